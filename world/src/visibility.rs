//! Viewport masks: traversability and the corridor-following fog of war.

use fog_maze_core::{CellCoord, CellRect, CellRectSize, Direction, Grid, Shade};

use crate::terrain::WorldGrid;

/// Viewport-sized traversability mask windowed out of the world terrain.
///
/// A cell is `true` when the player could walk onto it in the current mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallMask {
    open: Grid<bool>,
}

impl WallMask {
    /// Creates a mask of the given size with every cell open.
    #[must_use]
    pub fn new(size: CellRectSize) -> Self {
        Self {
            open: Grid::new(size.width(), size.height(), true),
        }
    }

    /// Windows `world` at `origin` and records which cells do not block.
    #[must_use]
    pub fn from_window(
        world: &WorldGrid,
        origin: CellCoord,
        size: CellRectSize,
        walls_block: bool,
    ) -> Self {
        Self {
            open: world
                .window(origin, size)
                .map(|terrain| !terrain.blocks(walls_block)),
        }
    }

    /// Wraps an explicit traversability grid.
    #[must_use]
    pub const fn from_grid(open: Grid<bool>) -> Self {
        Self { open }
    }

    /// Reports whether the viewport cell is traversable. Cells outside the mask are not.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.open.get(cell).copied().unwrap_or(false)
    }

    /// Underlying traversability grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid<bool> {
        &self.open
    }
}

/// Viewport-sized fog of war.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMask {
    shades: Grid<Shade>,
}

impl VisibilityMask {
    /// Creates a fully shadowed mask of the given size.
    #[must_use]
    pub fn new(size: CellRectSize) -> Self {
        Self {
            shades: Grid::new(size.width(), size.height(), Shade::Shadow),
        }
    }

    /// Sets every cell to `shade`.
    pub fn reset(&mut self, shade: Shade) {
        self.shades.reset(shade);
    }

    /// Lights the corridors visible from `start`.
    ///
    /// The start cell branches once into every open cardinal neighbour. Each
    /// branch then travels straight along its heading until the next cell is
    /// a wall or leaves the mask, never turning corners. Every visited cell
    /// also lights its four neighbours, walls included, so corridors show
    /// their side walls.
    pub fn sweep(&mut self, walls: &WallMask, start: CellCoord) {
        let mut pending: Vec<(CellCoord, Option<Direction>)> = vec![(start, None)];
        let mut visited = 0usize;

        while let Some((cell, heading)) = pending.pop() {
            visited += 1;
            self.light_cross(cell);

            match heading {
                // Reversed so the stack pops the arms in `Direction::ALL` order.
                None => {
                    for direction in Direction::ALL.into_iter().rev() {
                        if let Some(next) = self.open_neighbour(walls, cell, direction) {
                            pending.push((next, Some(direction)));
                        }
                    }
                }
                Some(direction) => {
                    if let Some(next) = self.open_neighbour(walls, cell, direction) {
                        pending.push((next, Some(direction)));
                    }
                }
            }
        }

        log::trace!("sweep from {start:?} visited {visited} cells");
    }

    /// Lights the square of `radius` cells around `center`, clipped to the mask.
    pub fn reveal_square(&mut self, center: CellCoord, radius: u32) {
        let column = center.column().saturating_sub(radius);
        let row = center.row().saturating_sub(radius);
        let right = center
            .column()
            .saturating_add(radius)
            .min(self.shades.width().saturating_sub(1));
        let bottom = center
            .row()
            .saturating_add(radius)
            .min(self.shades.height().saturating_sub(1));
        if column > right || row > bottom {
            return;
        }

        self.shades.fill(
            Shade::Lit,
            CellRect::from_origin_and_size(
                CellCoord::new(column, row),
                CellRectSize::new(right - column + 1, bottom - row + 1),
            ),
        );
    }

    /// Shade of a viewport cell, if it lies inside the mask.
    #[must_use]
    pub fn shade(&self, cell: CellCoord) -> Option<Shade> {
        self.shades.get(cell).copied()
    }

    /// Reports whether the viewport cell is lit.
    #[must_use]
    pub fn is_lit(&self, cell: CellCoord) -> bool {
        self.shade(cell) == Some(Shade::Lit)
    }

    /// Number of lit cells.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.shades
            .cells()
            .iter()
            .filter(|&&shade| shade == Shade::Lit)
            .count()
    }

    /// Underlying shade grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid<Shade> {
        &self.shades
    }

    fn light_cross(&mut self, cell: CellCoord) {
        let _ = self.shades.set(cell, Shade::Lit);
        for direction in Direction::ALL {
            if let Some(neighbour) = cell.step(direction) {
                let _ = self.shades.set(neighbour, Shade::Lit);
            }
        }
    }

    fn open_neighbour(
        &self,
        walls: &WallMask,
        cell: CellCoord,
        direction: Direction,
    ) -> Option<CellCoord> {
        cell.step(direction)
            .filter(|next| self.shades.contains(*next) && walls.is_open(*next))
    }
}
