#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fog Maze engine.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing the
//! player's intent, the world executes those commands via its `apply` entry
//! point, and then reports [`Event`] values describing what actually happened.
//! The layered [`Grid`] storage, the authored [`Level`] format and the explicit
//! [`ViewportConfig`] live here so every crate agrees on their shape.

mod grid;
mod level;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use grid::Grid;
pub use level::{find_exit, Level, LevelCode, LevelError, LevelSource};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Fog Maze.";

/// Describes the active gameplay mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Standard mode: walls block movement and the fog follows the player.
    #[default]
    Game,
    /// Free-roam mode: authored walls are passable and the fog is lifted.
    FreeRoam,
}

impl PlayMode {
    /// Returns the opposite mode, used by adapters that expose a single toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Game => Self::FreeRoam,
            Self::FreeRoam => Self::Game,
        }
    }

    /// Reports whether authored maze walls block movement in this mode.
    #[must_use]
    pub const fn walls_block(self) -> bool {
        matches!(self, Self::Game)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance a single tile in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the world transition to the provided play mode.
    SetPlayMode {
        /// Mode the world should activate.
        mode: PlayMode,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two world cells.
    PlayerMoved {
        /// Direction of the completed step.
        direction: Direction,
        /// World cell the player occupied before moving.
        from: CellCoord,
        /// World cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that a step was refused because the destination blocks.
    PlayerBlocked {
        /// Direction of the refused step.
        direction: Direction,
        /// World cell the player still occupies.
        at: CellCoord,
    },
    /// Announces that the player stands on the exit of the given level.
    ExitReached {
        /// Zero-based index of the completed level.
        level: usize,
    },
    /// Announces that a level has been loaded and the player placed at its start.
    LevelStarted {
        /// Zero-based index of the new level.
        level: usize,
        /// Exit location expressed in world coordinates.
        exit: CellCoord,
    },
    /// Announces that the last authored level was completed.
    LevelsExhausted,
    /// Announces that the world entered a new play mode.
    PlayModeChanged {
        /// Mode that became active after processing the command.
        mode: PlayMode,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order the visibility sweep branches.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell one step in `direction`, or `None` when the step
    /// would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        Some(CellCoord::new(column?, row?))
    }

    /// Translates the coordinate by the provided offset.
    #[must_use]
    pub const fn offset_by(self, columns: u32, rows: u32) -> CellCoord {
        CellCoord::new(self.column + columns, self.row + rows)
    }

    /// Subtracts `other` component-wise, returning `None` on underflow.
    #[must_use]
    pub fn checked_sub(self, other: CellCoord) -> Option<CellCoord> {
        Some(CellCoord::new(
            self.column.checked_sub(other.column)?,
            self.row.checked_sub(other.row)?,
        ))
    }

    /// Computes the straight-line distance between two cell coordinates.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f32 {
        let columns = self.column().abs_diff(other.column()) as f32;
        let rows = self.row().abs_diff(other.row()) as f32;
        columns.hypot(rows)
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column >= self.origin.column
            && cell.row >= self.origin.row
            && cell.column - self.origin.column < self.size.width
            && cell.row - self.origin.row < self.size.height
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Category of a world cell, decoupled from any display colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Plain walkable floor.
    Floor,
    /// Walkable floor painted on alternating rows.
    FloorAccent,
    /// Wall authored as part of the level.
    Wall,
    /// Wall filling the outer margin around the level.
    Border,
    /// Level exit.
    Exit,
}

impl Terrain {
    /// Reports whether the terrain stops the player.
    ///
    /// The outer border always blocks so the player can never leave the
    /// padded world, even when authored walls are passable.
    #[must_use]
    pub const fn blocks(self, walls_block: bool) -> bool {
        match self {
            Self::Border => true,
            Self::Wall => walls_block,
            Self::Floor | Self::FloorAccent | Self::Exit => false,
        }
    }
}

/// Fog state of a single viewport cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shade {
    /// The cell is visible.
    Lit,
    /// The cell is hidden by fog.
    Shadow,
}

/// Viewport dimensions and sight options passed to the world on construction.
///
/// Deserialized values go through [`ViewportConfig::new`], so stored
/// configurations are validated like hand-built ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredViewportConfig")]
pub struct ViewportConfig {
    width: u32,
    height: u32,
    sight_grows_with_level: bool,
}

impl ViewportConfig {
    /// Viewport width used when none is configured.
    pub const DEFAULT_WIDTH: u32 = 19;
    /// Viewport height used when none is configured.
    pub const DEFAULT_HEIGHT: u32 = 19;

    /// Creates a viewport with explicit dimensions.
    ///
    /// Both dimensions must be odd so the player sits on the exact centre cell.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroViewport { width, height });
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(ConfigError::EvenViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            sight_grows_with_level: false,
        })
    }

    /// Enables or disables the square of sight that widens with each level.
    #[must_use]
    pub const fn with_growing_sight(mut self, enabled: bool) -> Self {
        self.sight_grows_with_level = enabled;
        self
    }

    /// Width of the viewport in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the viewport in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions of the viewport as a rectangle size.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        CellRectSize::new(self.width, self.height)
    }

    /// Whether the square of sight around the player grows with the level.
    #[must_use]
    pub const fn sight_grows_with_level(&self) -> bool {
        self.sight_grows_with_level
    }

    /// Fixed player position inside the viewport, always its centre cell.
    #[must_use]
    pub const fn anchor(&self) -> CellCoord {
        CellCoord::new((self.width - 1) / 2, (self.height - 1) / 2)
    }

    /// Thickness of the border padding added around every level.
    ///
    /// Half the viewport on each axis, so a player standing on an edge of the
    /// maze still has a fully populated viewport.
    #[must_use]
    pub const fn outer_margin(&self) -> CellRectSize {
        CellRectSize::new((self.width - 1) / 2, (self.height - 1) / 2)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            sight_grows_with_level: false,
        }
    }
}

#[derive(Deserialize)]
struct StoredViewportConfig {
    width: u32,
    height: u32,
    sight_grows_with_level: bool,
}

impl TryFrom<StoredViewportConfig> for ViewportConfig {
    type Error = ConfigError;

    fn try_from(stored: StoredViewportConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(stored.width, stored.height)?
            .with_growing_sight(stored.sight_grows_with_level))
    }
}

/// Reasons a viewport configuration may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One of the dimensions was zero.
    #[error("viewport must not be empty (received {width}x{height})")]
    ZeroViewport {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// One of the dimensions was even, leaving no centre cell for the player.
    #[error("viewport dimensions must be odd (received {width}x{height})")]
    EvenViewport {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
