#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Fog Maze in the terminal.

mod input;
mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fog_maze_core::{Command, PlayMode, ViewportConfig};
use fog_maze_rendering::RenderingBackend;
use fog_maze_system_levels::LevelCatalog;
use fog_maze_world::{self as world, World};

use crate::{
    input::parse_script,
    session::{AnsiBackend, Session, TerminalBackend},
};

/// Walk a fog-covered maze one tile at a time.
#[derive(Debug, Parser)]
#[command(name = "fog-maze", version, about)]
struct Cli {
    /// TOML level pack to play instead of the built-in levels.
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,
    /// Viewport size in cells; both dimensions must be odd.
    #[arg(long, value_name = "WxH", default_value = "19x19", value_parser = parse_viewport)]
    viewport: ViewportConfig,
    /// Start with the fog lifted and authored walls passable.
    #[arg(long)]
    free_roam: bool,
    /// Always reveal a square around the player that grows with every level.
    #[arg(long)]
    grow_sight: bool,
    /// Paint the viewport with 24-bit terminal colors instead of glyphs.
    #[arg(long)]
    color: bool,
    /// Whitespace-separated moves to play instead of reading standard input.
    #[arg(long, value_name = "TOKENS")]
    moves: Option<String>,
}

fn parse_viewport(value: &str) -> Result<ViewportConfig, String> {
    let (width, height) = value
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid width `{width}`: {error}"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid height `{height}`: {error}"))?;
    ViewportConfig::new(width, height).map_err(|error| error.to_string())
}

/// Entry point for the Fog Maze command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let catalog = match &cli.levels {
        Some(path) => LevelCatalog::from_path(path)
            .with_context(|| format!("failed to load level pack {}", path.display()))?,
        None => LevelCatalog::builtin().context("built-in levels are invalid")?,
    };
    log::info!("loaded {} levels", catalog.levels().len());

    let config = cli.viewport.with_growing_sight(cli.grow_sight);
    let mut world =
        World::new(config, Box::new(catalog)).context("failed to start the first level")?;
    if cli.free_roam {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SetPlayMode {
                mode: PlayMode::FreeRoam,
            },
            &mut events,
        );
    }

    let stdout = io::stdout();
    if cli.color {
        play(world, AnsiBackend::new(stdout.lock()), cli.moves.as_deref())
    } else {
        play(world, TerminalBackend::new(stdout.lock()), cli.moves.as_deref())
    }
}

fn play<B: RenderingBackend>(world: World, backend: B, moves: Option<&str>) -> Result<()> {
    let mut session = Session::new(world, backend);
    session.render()?;

    match moves {
        Some(script) => session.run(parse_script(script)?),
        None => session.run_interactive(io::stdin().lock()),
    }
}
