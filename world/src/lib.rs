#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Fog Maze.
//!
//! The [`World`] exclusively owns the padded terrain of the current level, the
//! viewport wall mask, the viewport visibility mask and the player. Every
//! command is processed to completion by [`apply`]: collision check, mask
//! re-window, visibility sweep and, when the exit is reached, the level
//! transition.

mod player;
mod terrain;
mod visibility;

use fog_maze_core::{
    CellCoord, Command, Direction, Event, Level, LevelError, LevelSource, PlayMode, Shade,
    ViewportConfig, WELCOME_BANNER,
};

pub use player::Player;
pub use terrain::WorldGrid;
pub use visibility::{VisibilityMask, WallMask};

/// Represents the authoritative Fog Maze world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: ViewportConfig,
    levels: Box<dyn LevelSource>,
    level_index: usize,
    level: Level,
    terrain: WorldGrid,
    walls: WallMask,
    visibility: VisibilityMask,
    player: Player,
    play_mode: PlayMode,
    distance: u32,
    finished: bool,
}

impl World {
    /// Creates a world positioned at the start of the first level.
    ///
    /// Fails when the source cannot provide a first level.
    pub fn new(config: ViewportConfig, levels: Box<dyn LevelSource>) -> Result<Self, LevelError> {
        let level = levels.level(0).ok_or(LevelError::NoLevels)?;
        let terrain = WorldGrid::for_level(&config, &level);
        let mut world = Self {
            banner: WELCOME_BANNER,
            walls: WallMask::new(config.size()),
            visibility: VisibilityMask::new(config.size()),
            player: Player::new(config.anchor()),
            config,
            levels,
            level_index: 0,
            level,
            terrain,
            play_mode: PlayMode::Game,
            distance: 0,
            finished: false,
        };
        world.assert_viewport_fits();
        world.refresh_view();
        log::info!(
            "level 1 of {} started ({}x{})",
            world.levels.len(),
            world.level.width(),
            world.level.height()
        );
        Ok(world)
    }

    fn assert_viewport_fits(&self) {
        assert!(
            self.terrain.covers_viewport(&self.config),
            "outer margin {:?} cannot hold a {}x{} viewport",
            self.terrain.margin(),
            self.config.width(),
            self.config.height()
        );
    }

    fn exit_cell(&self) -> CellCoord {
        self.terrain.to_world(self.level.exit())
    }

    fn on_exit(&self) -> bool {
        self.player.position() == self.exit_cell()
    }

    fn refresh_view(&mut self) {
        self.walls = WallMask::from_window(
            &self.terrain,
            self.player.viewport_origin(),
            self.config.size(),
            self.play_mode.walls_block(),
        );

        match self.play_mode {
            PlayMode::Game => {
                self.visibility.reset(Shade::Shadow);
                self.visibility.sweep(&self.walls, self.player.anchor());
                if self.config.sight_grows_with_level() {
                    let radius = u32::try_from(self.level_index + 1).unwrap_or(u32::MAX);
                    self.visibility.reveal_square(self.player.anchor(), radius);
                }
            }
            PlayMode::FreeRoam => self.visibility.reset(Shade::Lit),
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.finished {
            log::warn!("ignoring {direction:?}: every level is complete");
            return;
        }

        let from = self.player.position();
        self.distance = self.player.advance(
            direction,
            &self.terrain,
            self.play_mode.walls_block(),
            self.distance,
        );

        if self.player.position() == from {
            log::debug!("{direction:?} blocked at {from:?}");
            out_events.push(Event::PlayerBlocked {
                direction,
                at: from,
            });
        } else {
            let to = self.player.position();
            log::debug!("{direction:?} from {from:?} to {to:?}");
            out_events.push(Event::PlayerMoved {
                direction,
                from,
                to,
            });
        }

        self.refresh_view();

        if self.on_exit() {
            out_events.push(Event::ExitReached {
                level: self.level_index,
            });
            self.advance_level(out_events);
        }
    }

    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        let next_index = self.level_index + 1;
        let Some(level) = self.levels.level(next_index) else {
            log::info!("all {} levels complete", self.levels.len());
            self.finished = true;
            out_events.push(Event::LevelsExhausted);
            return;
        };

        self.level_index = next_index;
        self.terrain = WorldGrid::for_level(&self.config, &level);
        self.level = level;
        self.assert_viewport_fits();
        self.player.reset_to_anchor();
        self.refresh_view();

        log::info!(
            "level {} of {} started ({}x{})",
            next_index + 1,
            self.levels.len(),
            self.level.width(),
            self.level.height()
        );
        out_events.push(Event::LevelStarted {
            level: next_index,
            exit: self.exit_cell(),
        });
    }

    fn set_play_mode(&mut self, mode: PlayMode, out_events: &mut Vec<Event>) {
        if self.play_mode == mode {
            return;
        }
        self.play_mode = mode;
        self.refresh_view();
        log::info!("switched to {mode:?}");
        out_events.push(Event::PlayModeChanged { mode });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => world.move_player(direction, out_events),
        Command::SetPlayMode { mode } => world.set_play_mode(mode, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use fog_maze_core::{CellCoord, Grid, Level, PlayMode, Shade, Terrain, ViewportConfig};

    use super::{Player, WallMask, World, WorldGrid};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Viewport configuration the world was built with.
    #[must_use]
    pub fn viewport(world: &World) -> ViewportConfig {
        world.config
    }

    /// Zero-based index of the level being played.
    #[must_use]
    pub fn level_index(world: &World) -> usize {
        world.level_index
    }

    /// Number of levels offered by the level source.
    #[must_use]
    pub fn level_count(world: &World) -> usize {
        world.levels.len()
    }

    /// Authored data of the level being played.
    #[must_use]
    pub fn level(world: &World) -> &Level {
        &world.level
    }

    /// Active play mode.
    #[must_use]
    pub fn play_mode(world: &World) -> PlayMode {
        world.play_mode
    }

    /// Number of successful steps taken since the world was created.
    #[must_use]
    pub fn distance(world: &World) -> u32 {
        world.distance
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Exit of the current level in world coordinates.
    #[must_use]
    pub fn exit_cell(world: &World) -> CellCoord {
        world.exit_cell()
    }

    /// Reports whether the player stands on the exit.
    #[must_use]
    pub fn on_exit(world: &World) -> bool {
        world.on_exit()
    }

    /// Reports whether the last level was completed; moves are ignored afterwards.
    #[must_use]
    pub fn is_finished(world: &World) -> bool {
        world.finished
    }

    /// Provides read-only access to the padded terrain of the current level.
    #[must_use]
    pub fn world_grid(world: &World) -> &WorldGrid {
        &world.terrain
    }

    /// Copies the terrain currently covered by the viewport.
    #[must_use]
    pub fn terrain_window(world: &World) -> Grid<Terrain> {
        world
            .terrain
            .window(world.player.viewport_origin(), world.config.size())
    }

    /// Provides read-only access to the viewport traversability mask.
    #[must_use]
    pub fn wall_mask(world: &World) -> &WallMask {
        &world.walls
    }

    /// Provides read-only access to the viewport fog.
    #[must_use]
    pub fn visibility(world: &World) -> &Grid<Shade> {
        world.visibility.grid()
    }
}
