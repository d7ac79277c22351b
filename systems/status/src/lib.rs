#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player status reporting for Fog Maze.
//!
//! The [`Status`] system watches world events and captures a [`StatusReport`]
//! whenever something changed: the level being played, where its exit lies,
//! where the player stands, how far the exit is in a straight line, how many
//! tiles the player has travelled so far and how long the level has taken.

mod timer;

use std::{fmt, time::Duration};

use fog_maze_core::{CellCoord, Event, PlayMode};
use fog_maze_world::{query, World};

pub use timer::{Clock, SystemClock};

use timer::{format_elapsed, LevelTimer};

/// Pure system that keeps the latest status report up to date.
///
/// The level timer starts on the first move of a level, attempted or not,
/// restarts from zero whenever a new level begins and stops once every level
/// is complete.
#[derive(Debug)]
pub struct Status<C = SystemClock> {
    clock: C,
    timer: LevelTimer,
    last_report: Option<StatusReport>,
    blocked_moves: u32,
    levels_completed: usize,
}

impl Status {
    /// Creates a status system timed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Status<C> {
    /// Creates a status system that reads time from `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            timer: LevelTimer::default(),
            last_report: None,
            blocked_moves: 0,
            levels_completed: 0,
        }
    }

    /// Consumes world events and refreshes the report when the world changed.
    ///
    /// The first call always captures a report so adapters can display the
    /// initial state before any command was applied.
    pub fn handle(&mut self, events: &[Event], world: &World) {
        let now = self.clock.now();
        for event in events {
            match event {
                Event::PlayerMoved { .. } => self.timer.start(now),
                Event::PlayerBlocked { .. } => {
                    self.timer.start(now);
                    self.blocked_moves = self.blocked_moves.saturating_add(1);
                }
                Event::ExitReached { .. } => self.levels_completed += 1,
                Event::LevelStarted { .. } => self.timer.reset(),
                Event::LevelsExhausted => self.timer.stop(now),
                Event::PlayModeChanged { .. } => {}
            }
        }

        if self.last_report.is_none() || !events.is_empty() {
            self.last_report = Some(StatusReport::capture(world, self.timer.elapsed(now)));
        }
    }

    /// Time spent on the current level so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed(self.clock.now())
    }

    /// Returns the last report captured by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatusReport> {
        self.last_report.as_ref()
    }

    /// Number of moves rejected by walls or the border.
    #[must_use]
    pub const fn blocked_moves(&self) -> u32 {
        self.blocked_moves
    }

    /// Number of exits reached.
    #[must_use]
    pub const fn levels_completed(&self) -> usize {
        self.levels_completed
    }
}

/// Snapshot of the player's progress through the maze.
///
/// Coordinates are relative to the authored level, not the padded world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    level: usize,
    level_count: usize,
    exit: CellCoord,
    position: Option<CellCoord>,
    distance_tenths: u32,
    travelled: u32,
    play_mode: PlayMode,
    finished: bool,
    elapsed: Duration,
}

impl StatusReport {
    /// Reads the current world state into a report stamped with the time
    /// spent on the level.
    #[must_use]
    pub fn capture(world: &World, elapsed: Duration) -> Self {
        let terrain = query::world_grid(world);
        let position = query::player(world).position();
        let exit = query::exit_cell(world);
        let straight_line = position.euclidean_distance(exit);

        Self {
            level: query::level_index(world) + 1,
            level_count: query::level_count(world),
            exit: query::level(world).exit(),
            position: terrain.to_interior(position),
            distance_tenths: (straight_line * 10.0).round() as u32,
            travelled: query::distance(world),
            play_mode: query::play_mode(world),
            finished: query::is_finished(world),
            elapsed,
        }
    }

    /// One-based number of the level being played.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Number of levels in the run.
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.level_count
    }

    /// Exit of the current level.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Player position, absent only if the player somehow left the maze interior.
    #[must_use]
    pub const fn position(&self) -> Option<CellCoord> {
        self.position
    }

    /// Straight-line distance to the exit in tenths of a tile.
    #[must_use]
    pub const fn distance_tenths(&self) -> u32 {
        self.distance_tenths
    }

    /// Straight-line distance to the exit rounded to a tenth of a tile.
    #[must_use]
    pub fn distance_to_exit(&self) -> f32 {
        self.distance_tenths as f32 / 10.0
    }

    /// Tiles travelled since the run started.
    #[must_use]
    pub const fn travelled(&self) -> u32 {
        self.travelled
    }

    /// Mode the world was in when the report was captured.
    #[must_use]
    pub const fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Reports whether every level was completed.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Time spent on the level when the report was captured.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finished {
            return write!(
                f,
                "Mission complete! {} tiles travelled.",
                self.travelled
            );
        }

        writeln!(f, "Level: {} of {}", self.level, self.level_count)?;
        writeln!(f, "Exit: {}, {}", self.exit.column(), self.exit.row())?;
        match self.position {
            Some(position) => writeln!(f, "Position: {}, {}", position.column(), position.row())?,
            None => writeln!(f, "Position: outside the maze")?,
        }
        writeln!(
            f,
            "Distance to exit: {}.{}",
            self.distance_tenths / 10,
            self.distance_tenths % 10
        )?;
        writeln!(f, "Time: {}", format_elapsed(self.elapsed))?;
        write!(f, "Moves: {}", self.travelled)?;
        if self.play_mode == PlayMode::FreeRoam {
            write!(f, " (free roam)")?;
        }
        Ok(())
    }
}
