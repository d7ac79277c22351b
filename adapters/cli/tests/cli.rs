use std::{
    path::PathBuf,
    process::{Command, Output},
};

const PACK: &str = r#"
[[levels]]
rows = ["000", "110", "009"]
"#;

fn write_pack(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fog-maze-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, PACK).expect("write level pack");
    path
}

fn fog_maze(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fog-maze"))
        .args(args)
        .output()
        .expect("failed to run fog-maze")
}

#[test]
fn scripted_moves_complete_a_level_pack() {
    let pack = write_pack("complete");
    let path = pack.to_str().expect("utf-8 temp path");

    let output = fog_maze(&["--levels", path, "--viewport", "5x5", "--moves", "d d s s"]);
    std::fs::remove_file(&pack).expect("remove level pack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Fog Maze."));
    assert!(stdout.contains("Level 1 complete!"));
    assert!(stdout.trim_end().ends_with("Mission complete! 4 tiles travelled."));
}

#[test]
fn unknown_moves_are_rejected_before_playing() {
    let output = fog_maze(&["--moves", "d fly"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown move `fly`"));
}

#[test]
fn even_viewports_are_rejected() {
    let output = fog_maze(&["--viewport", "8x9"]);

    assert!(!output.status.success());
}

#[test]
fn missing_level_pack_is_reported() {
    let output = fog_maze(&["--levels", "no/such/pack.toml", "--moves", "d"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no/such/pack.toml"));
}

#[test]
fn color_flag_paints_the_viewport() {
    let pack = write_pack("color");
    let path = pack.to_str().expect("utf-8 temp path");

    let output = fog_maze(&["--levels", path, "--viewport", "5x5", "--color", "--moves", "d"]);
    std::fs::remove_file(&pack).expect("remove level pack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b[48;2;128;0;128m  "));
    assert!(stdout.contains("\x1b[48;2;0;0;255m  "));
    assert!(!stdout.contains("+-----+"));
    assert!(stdout.contains("Moves: 1"));
}
