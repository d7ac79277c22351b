//! Play loop tying the world, the status system and a rendering backend together.

use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
};

use anyhow::{Context, Result};
use fog_maze_core::{Command, Event, PlayMode};
use fog_maze_rendering::{
    compose_frame, rasterize, text_frame, CanvasLayout, Palette, Presentation, RenderingBackend,
    Scene,
};
use fog_maze_system_status::Status;
use fog_maze_world::{self as world, query, World};

use crate::input::{parse_token, Input};

/// Backend printing text frames to a writer.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
}

impl<W: Write> TerminalBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<()> {
        writeln!(self.out, "{}", presentation.title)?;
        writeln!(self.out, "{}", text_frame(&presentation.scene))?;
        writeln!(self.out, "{}\n", presentation.caption)?;
        self.out.flush().context("failed to flush the terminal")
    }
}

/// Backend painting frames with 24-bit ANSI background colors.
///
/// Every pixel of a one-pixel-per-cell canvas is printed as two blank
/// columns so cells come out roughly square.
#[derive(Debug)]
pub(crate) struct AnsiBackend<W> {
    out: W,
    palette: Palette,
}

impl<W: Write> AnsiBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            palette: Palette::default(),
        }
    }
}

impl<W: Write> RenderingBackend for AnsiBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<()> {
        let scene = &presentation.scene;
        let layout = CanvasLayout::new(scene.terrain().size(), 1.0, 1)?;
        let pixels = rasterize(
            &compose_frame(scene, &layout, &self.palette),
            &layout,
            self.palette.shadow,
        );

        writeln!(self.out, "{}", presentation.title)?;
        for row in pixels.rows() {
            for color in row {
                let [red, green, blue] = color.to_rgb_u8();
                write!(self.out, "\x1b[48;2;{red};{green};{blue}m  ")?;
            }
            writeln!(self.out, "\x1b[0m")?;
        }
        writeln!(self.out, "{}\n", presentation.caption)?;
        self.out.flush().context("failed to flush the terminal")
    }
}

/// Single play-through driven by typed inputs.
#[derive(Debug)]
pub(crate) struct Session<B> {
    world: World,
    status: Status,
    backend: B,
    events: Vec<Event>,
}

impl<B: RenderingBackend> Session<B> {
    pub(crate) fn new(world: World, backend: B) -> Self {
        let mut status = Status::new();
        status.handle(&[], &world);
        Self {
            world,
            status,
            backend,
            events: Vec::new(),
        }
    }

    /// Applies one input and presents the resulting frame.
    ///
    /// Breaks once the player quits or every level is complete.
    pub(crate) fn apply(&mut self, input: Input) -> Result<ControlFlow<()>> {
        let command = match input {
            Input::Move(direction) => Command::Move { direction },
            Input::ToggleMode => Command::SetPlayMode {
                mode: query::play_mode(&self.world).toggled(),
            },
            Input::Quit => {
                log::info!("player quit");
                return Ok(ControlFlow::Break(()));
            }
        };

        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        self.status.handle(&self.events, &self.world);
        self.render()?;

        if query::is_finished(&self.world) {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }

    /// Applies inputs in order until the session ends.
    pub(crate) fn run(&mut self, inputs: impl IntoIterator<Item = Input>) -> Result<()> {
        for input in inputs {
            if self.apply(input)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Reads tokens line by line, skipping anything unrecognised.
    pub(crate) fn run_interactive(&mut self, reader: impl BufRead) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("failed to read input")?;
            for token in line.split_whitespace() {
                let Some(input) = parse_token(token) else {
                    log::warn!("ignoring unknown input `{token}`");
                    continue;
                };
                if self.apply(input)?.is_break() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Presents the current state of the world.
    pub(crate) fn render(&mut self) -> Result<()> {
        let scene = Scene::new(
            query::terrain_window(&self.world),
            query::visibility(&self.world).clone(),
            query::player(&self.world).anchor(),
            query::play_mode(&self.world),
        )
        .context("world snapshot does not fit the viewport")?;

        let mut caption: Vec<String> = self.events.iter().filter_map(notice).collect();
        if let Some(report) = self.status.last_report() {
            caption.push(report.to_string());
        }

        self.backend.present(&Presentation::new(
            query::welcome_banner(&self.world),
            scene,
            caption.join("\n"),
        ))
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }
}

fn notice(event: &Event) -> Option<String> {
    match event {
        Event::PlayerBlocked { .. } => Some("Bump!".to_owned()),
        Event::ExitReached { level } => Some(format!("Level {} complete!", level + 1)),
        Event::PlayModeChanged {
            mode: PlayMode::FreeRoam,
        } => Some("Free roam: walls are open and the fog is lifted.".to_owned()),
        Event::PlayModeChanged {
            mode: PlayMode::Game,
        } => Some("Back to the game.".to_owned()),
        Event::PlayerMoved { .. } | Event::LevelStarted { .. } | Event::LevelsExhausted => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use fog_maze_core::{Direction, ViewportConfig};
    use fog_maze_system_levels::LevelCatalog;

    #[derive(Debug, Default)]
    struct Recorder {
        frames: Vec<Presentation>,
    }

    impl RenderingBackend for Recorder {
        fn present(&mut self, presentation: &Presentation) -> Result<()> {
            self.frames.push(presentation.clone());
            Ok(())
        }
    }

    fn session() -> Session<Recorder> {
        let levels: &[&[&str]] = &[&["000", "110", "009"]];
        let catalog = LevelCatalog::from_text_rows(levels).expect("valid level");
        let world = World::new(
            ViewportConfig::new(5, 5).expect("valid viewport"),
            Box::new(catalog),
        )
        .expect("world builds");
        Session::new(world, Recorder::default())
    }

    fn last_caption(session: &Session<Recorder>) -> &str {
        &session
            .backend()
            .frames
            .last()
            .expect("a frame was presented")
            .caption
    }

    #[test]
    fn blocked_moves_are_announced() {
        let mut session = session();

        let flow = session
            .apply(Input::Move(Direction::Down))
            .expect("frame presented");

        assert!(flow.is_continue());
        assert!(last_caption(&session).starts_with("Bump!\nLevel: 1 of 1"));
    }

    #[test]
    fn completing_the_last_level_ends_the_session() {
        let mut session = session();
        let moves = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
        ];

        session
            .run(moves.into_iter().map(Input::Move))
            .expect("session runs");

        assert_eq!(session.backend().frames.len(), 4);
        assert_eq!(
            last_caption(&session),
            "Level 1 complete!\nMission complete! 4 tiles travelled."
        );
        assert!(query::is_finished(session.world()));
    }

    #[test]
    fn toggling_mode_lifts_the_fog() {
        let mut session = session();

        let _ = session.apply(Input::ToggleMode).expect("frame presented");

        assert_eq!(query::play_mode(session.world()), PlayMode::FreeRoam);
        let frame = session.backend().frames.last().expect("a frame was presented");
        assert!(!text_frame(&frame.scene).contains(' '));
        assert!(last_caption(&session).starts_with("Free roam"));
    }

    #[test]
    fn interactive_input_skips_unknown_tokens_and_stops_on_quit() {
        let mut session = session();

        session
            .run_interactive(Cursor::new("d\njump d\nq s\n"))
            .expect("session runs");

        assert_eq!(session.backend().frames.len(), 2);
        assert_eq!(query::distance(session.world()), 2);
    }

    #[test]
    fn terminal_backend_prints_title_frame_and_caption() {
        let mut session = session();
        let frame = {
            session.render().expect("frame presented");
            session.backend().frames[0].clone()
        };
        let mut backend = TerminalBackend::new(Vec::new());

        backend.present(&frame).expect("written");

        let printed = String::from_utf8(backend.out).expect("utf-8 output");
        assert!(printed.starts_with("Welcome to Fog Maze.\n+-----+\n"));
        assert!(printed.contains("| #@..|"));
        assert!(printed.ends_with("Moves: 0\n\n"));
    }

    #[test]
    fn ansi_backend_paints_the_frame_player_and_fog() {
        let mut session = session();
        session.render().expect("frame presented");
        let frame = session.backend().frames[0].clone();
        let mut backend = AnsiBackend::new(Vec::new());

        backend.present(&frame).expect("written");

        let printed = String::from_utf8(backend.out).expect("utf-8 output");
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines[0], "Welcome to Fog Maze.");
        let purple = "\x1b[48;2;128;0;128m  ";
        assert_eq!(lines[1], format!("{}\x1b[0m", purple.repeat(7)));
        assert_eq!(lines[7], lines[1]);
        let player_row = lines[4];
        assert!(player_row.starts_with(purple));
        assert!(player_row.contains("\x1b[48;2;0;0;255m  "));
        assert_eq!(player_row.matches("\x1b[48;2;0;0;0m  ").count(), 1);
        assert!(printed.ends_with("Moves: 0\n\n"));
    }
}
