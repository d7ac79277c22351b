//! Padded world map holding the terrain of the current level.

use fog_maze_core::{
    CellCoord, CellRect, CellRectSize, Grid, Level, LevelCode, Terrain, ViewportConfig,
};

/// Terrain of the whole level surrounded by a border margin.
///
/// Interior cells live at `margin + coordinate`; everything outside the
/// interior is border. The margin is at least half the viewport on each axis
/// so that a viewport centred on any interior cell stays inside the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    grid: Grid<Terrain>,
    margin: CellRectSize,
    map_size: CellRectSize,
}

impl WorldGrid {
    /// Allocates a striped floor sized for `map_size` plus the margin on every side.
    #[must_use]
    pub fn create(margin: CellRectSize, map_size: CellRectSize) -> Self {
        let width = map_size.width() + 2 * margin.width();
        let height = map_size.height() + 2 * margin.height();
        Self {
            grid: Grid::striped(width, height, Terrain::Floor, Terrain::FloorAccent),
            margin,
            map_size,
        }
    }

    /// Builds the complete terrain for `level` as seen through `config`.
    #[must_use]
    pub fn for_level(config: &ViewportConfig, level: &Level) -> Self {
        let mut world = Self::create(
            config.outer_margin(),
            CellRectSize::new(level.width(), level.height()),
        );
        world.paint_outer_border();
        world.paint_level(level);
        world
    }

    /// Writes `value` at an interior-relative coordinate.
    pub fn set_cell(&mut self, value: Terrain, interior: CellCoord) {
        let written = self.grid.set(self.to_world(interior), value);
        debug_assert!(written, "interior cell {interior:?} outside world grid");
    }

    /// Terrain at an absolute world coordinate.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Terrain> {
        self.grid.get(cell).copied()
    }

    /// Paints authored walls and the exit over the floor. Open cells keep the floor.
    pub fn paint_level(&mut self, level: &Level) {
        for (row, line) in level.cells().rows().enumerate() {
            for (column, code) in line.iter().enumerate() {
                let terrain = match code {
                    LevelCode::Wall => Terrain::Wall,
                    LevelCode::Exit => Terrain::Exit,
                    LevelCode::Open => continue,
                };
                self.set_cell(terrain, CellCoord::new(column as u32, row as u32));
            }
        }
    }

    /// Fills the four margin strips around the interior with border terrain.
    pub fn paint_outer_border(&mut self) {
        let width = self.grid.width();
        let height = self.grid.height();
        let margin_width = self.margin.width();
        let margin_height = self.margin.height();

        let strips = [
            (CellCoord::new(0, 0), CellRectSize::new(width, margin_height)),
            (
                CellCoord::new(0, height - margin_height),
                CellRectSize::new(width, margin_height),
            ),
            (
                CellCoord::new(0, margin_height),
                CellRectSize::new(margin_width, self.map_size.height()),
            ),
            (
                CellCoord::new(width - margin_width, margin_height),
                CellRectSize::new(margin_width, self.map_size.height()),
            ),
        ];
        for (origin, size) in strips {
            self.grid
                .fill(Terrain::Border, CellRect::from_origin_and_size(origin, size));
        }
    }

    /// Copies the viewport-sized window whose top-left cell is `origin`.
    #[must_use]
    pub fn window(&self, origin: CellCoord, size: CellRectSize) -> Grid<Terrain> {
        self.grid
            .extract(CellRect::from_origin_and_size(origin, size))
    }

    /// Reports whether a viewport of `config` fits around every interior cell.
    #[must_use]
    pub fn covers_viewport(&self, config: &ViewportConfig) -> bool {
        let anchor = config.anchor();
        self.margin.width() >= anchor.column()
            && self.margin.height() >= anchor.row()
            && self.margin.width() >= config.width() - 1 - anchor.column()
            && self.margin.height() >= config.height() - 1 - anchor.row()
    }

    /// Converts an interior-relative coordinate into a world coordinate.
    #[must_use]
    pub const fn to_world(&self, interior: CellCoord) -> CellCoord {
        interior.offset_by(self.margin.width(), self.margin.height())
    }

    /// Converts a world coordinate into an interior-relative one, if inside the maze.
    #[must_use]
    pub fn to_interior(&self, cell: CellCoord) -> Option<CellCoord> {
        if self.interior().contains(cell) {
            cell.checked_sub(CellCoord::new(self.margin.width(), self.margin.height()))
        } else {
            None
        }
    }

    /// Rectangle covering the authored maze in world coordinates.
    #[must_use]
    pub const fn interior(&self) -> CellRect {
        CellRect::from_origin_and_size(
            CellCoord::new(self.margin.width(), self.margin.height()),
            self.map_size,
        )
    }

    /// Thickness of the border on each axis.
    #[must_use]
    pub const fn margin(&self) -> CellRectSize {
        self.margin
    }

    /// Size of the authored maze.
    #[must_use]
    pub const fn map_size(&self) -> CellRectSize {
        self.map_size
    }

    /// Underlying padded grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid<Terrain> {
        &self.grid
    }
}
