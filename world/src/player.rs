//! Player position and the viewport transform derived from it.

use fog_maze_core::{CellCoord, Direction};

use crate::terrain::WorldGrid;

/// Single player walking the maze one tile at a time.
///
/// The anchor is the player's fixed cell inside the viewport. The position is
/// expressed in world coordinates and is never left on a blocking cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    anchor: CellCoord,
    position: CellCoord,
    previous: Option<CellCoord>,
}

impl Player {
    /// Creates a player standing on its anchor.
    #[must_use]
    pub const fn new(anchor: CellCoord) -> Self {
        Self {
            anchor,
            position: anchor,
            previous: None,
        }
    }

    /// Fixed viewport cell the player is drawn on.
    #[must_use]
    pub const fn anchor(&self) -> CellCoord {
        self.anchor
    }

    /// Current world position.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Position saved before the last move attempt.
    #[must_use]
    pub const fn previous(&self) -> Option<CellCoord> {
        self.previous
    }

    /// World coordinate of the viewport's top-left cell.
    #[must_use]
    pub fn viewport_origin(&self) -> CellCoord {
        CellCoord::new(
            self.position.column().saturating_sub(self.anchor.column()),
            self.position.row().saturating_sub(self.anchor.row()),
        )
    }

    /// Attempts a single step and returns the updated travelled distance.
    ///
    /// When the destination blocks, the position and distance are restored so
    /// repeated attempts against the same wall change nothing.
    pub fn advance(
        &mut self,
        direction: Direction,
        world: &WorldGrid,
        walls_block: bool,
        distance: u32,
    ) -> u32 {
        self.previous = Some(self.position);
        let Some(destination) = self.position.step(direction) else {
            return distance;
        };
        self.position = destination;
        let travelled = distance.saturating_add(1);

        let blocked = world
            .cell(destination)
            .map_or(true, |terrain| terrain.blocks(walls_block));
        if blocked {
            self.position = self.previous.unwrap_or(self.position);
            return distance;
        }

        travelled
    }

    /// Returns the player to the anchor, as done when a new level starts.
    pub fn reset_to_anchor(&mut self) {
        self.position = self.anchor;
        self.previous = None;
    }
}
