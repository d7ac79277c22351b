//! Dense row-major grid shared by the world map and the viewport masks.

use crate::{CellCoord, CellRect, CellRectSize};

/// Rectangular mapping from cell coordinates to values.
///
/// Cells are stored row-major in a single buffer and every cell is
/// initialised on construction. Sub-rectangle operations (`fill`, `extract`,
/// `to_binary`) expect the rectangle to lie inside the grid; callers are
/// responsible for computing safe rectangles and a violation panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn new(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; cell_count(width, height)],
        }
    }

    /// Creates a grid whose even rows hold `secondary` and odd rows `primary`.
    #[must_use]
    pub fn striped(width: u32, height: u32, primary: T, secondary: T) -> Self {
        let mut cells = Vec::with_capacity(cell_count(width, height));
        for row in 0..height {
            let value = if row % 2 == 0 { &secondary } else { &primary };
            cells.extend(std::iter::repeat(value).take(width as usize).cloned());
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from explicit rows, or `None` when the rows are empty or ragged.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = u32::try_from(rows.first()?.len()).ok()?;
        if width == 0 || rows.iter().any(|row| row.len() != width as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Overwrites every cell inside `rect` with `value`.
    pub fn fill(&mut self, value: T, rect: CellRect) {
        self.assert_inside(rect);
        let width = self.width as usize;
        let start_column = rect.origin().column() as usize;
        let end_column = start_column + rect.size().width() as usize;
        for row in rect.origin().row()..rect.origin().row() + rect.size().height() {
            let offset = row as usize * width;
            self.cells[offset + start_column..offset + end_column].fill(value.clone());
        }
    }

    /// Overwrites every cell of the grid with `value`.
    pub fn reset(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Copies the cells inside `rect` into a new, independent grid.
    #[must_use]
    pub fn extract(&self, rect: CellRect) -> Grid<T> {
        self.assert_inside(rect);
        let width = self.width as usize;
        let start_column = rect.origin().column() as usize;
        let end_column = start_column + rect.size().width() as usize;
        let mut cells = Vec::with_capacity(cell_count(rect.size().width(), rect.size().height()));
        for row in rect.origin().row()..rect.origin().row() + rect.size().height() {
            let offset = row as usize * width;
            cells.extend_from_slice(&self.cells[offset + start_column..offset + end_column]);
        }
        Grid {
            width: rect.size().width(),
            height: rect.size().height(),
            cells,
        }
    }

    /// Extracts `rect` and marks every cell equal to `on_value` as `true`.
    #[must_use]
    pub fn to_binary(&self, on_value: &T, rect: CellRect) -> Grid<bool>
    where
        T: PartialEq,
    {
        self.extract(rect).map(|cell| cell == on_value)
    }

    fn assert_inside(&self, rect: CellRect) {
        let right = u64::from(rect.origin().column()) + u64::from(rect.size().width());
        let bottom = u64::from(rect.origin().row()) + u64::from(rect.size().height());
        assert!(
            right <= u64::from(self.width) && bottom <= u64::from(self.height),
            "rectangle {rect:?} exceeds {}x{} grid",
            self.width,
            self.height
        );
    }
}

impl<T> Grid<T> {
    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        CellRectSize::new(self.width, self.height)
    }

    /// Rectangle covering the whole grid.
    #[must_use]
    pub const fn bounds(&self) -> CellRect {
        CellRect::from_origin_and_size(CellCoord::new(0, 0), self.size())
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Value stored at `cell`, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&T> {
        self.index(cell).map(|index| &self.cells[index])
    }

    /// Replaces the value stored at `cell`. Returns `false` when out of bounds.
    pub fn set(&mut self, cell: CellCoord, value: T) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Dense cells stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterator over the grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Builds a grid of the same shape by mapping every cell.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row() as usize * self.width as usize + cell.column() as usize)
        } else {
            None
        }
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(column: u32, row: u32, width: u32, height: u32) -> CellRect {
        CellRect::from_origin_and_size(CellCoord::new(column, row), CellRectSize::new(width, height))
    }

    #[test]
    fn striped_grid_places_secondary_on_even_rows() {
        let grid = Grid::striped(3, 4, 'p', 's');
        let rows: Vec<String> = grid.rows().map(|row| row.iter().collect()).collect();
        assert_eq!(rows, vec!["sss", "ppp", "sss", "ppp"]);
    }

    #[test]
    fn fill_only_touches_the_rectangle() {
        let mut grid = Grid::new(4, 3, 0);
        grid.fill(7, rect(1, 1, 2, 2));
        assert_eq!(grid.cells(), &[0, 0, 0, 0, 0, 7, 7, 0, 0, 7, 7, 0]);
    }

    #[test]
    fn extract_copies_rows_in_order_without_mutating_source() {
        let source = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
            .expect("rectangular rows");
        let mut window = source.extract(rect(1, 1, 2, 2));
        assert_eq!(window.size(), CellRectSize::new(2, 2));
        assert_eq!(window.cells(), &[5, 6, 8, 9]);

        window.reset(0);
        assert_eq!(source.get(CellCoord::new(1, 1)), Some(&5));
    }

    #[test]
    fn to_binary_flags_matching_cells() {
        let source = Grid::from_rows(vec![vec!['#', '.'], vec!['.', '#']]).expect("rows");
        let binary = source.to_binary(&'#', source.bounds());
        assert_eq!(binary.cells(), &[true, false, false, true]);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn extract_outside_bounds_panics() {
        let grid = Grid::new(2, 2, 0u8);
        let _ = grid.extract(rect(1, 1, 2, 1));
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let mut once = Grid::new(3, 3, 1u8);
        assert!(once.set(CellCoord::new(2, 2), 9));
        let mut twice = once.clone();
        once.reset(4);
        twice.reset(4);
        twice.reset(4);
        assert_eq!(once, twice);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_none());
        assert!(Grid::<u8>::from_rows(Vec::new()).is_none());
    }

    #[test]
    fn set_outside_bounds_is_refused() {
        let mut grid = Grid::new(2, 2, 0u8);
        assert!(!grid.set(CellCoord::new(2, 0), 1));
        assert!(grid.set(CellCoord::new(1, 1), 1));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(&1));
    }
}
