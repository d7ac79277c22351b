//! Authored level format and the provider contract used by the world.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, Grid};

/// Code stored in each cell of an authored level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelCode {
    /// Walkable cell, authored as `0`.
    Open,
    /// Maze wall, authored as `1`.
    Wall,
    /// Level exit, authored as `9`.
    Exit,
}

impl LevelCode {
    /// Numeric value used in authored level data.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Wall => 1,
            Self::Exit => 9,
        }
    }

    /// Parses an authored numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Wall),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Validated authored maze with its exit already located.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    cells: Grid<LevelCode>,
    exit: CellCoord,
}

impl Level {
    /// Validates authored numeric rows for the level at `index`.
    ///
    /// The rows must form a non-empty rectangle of known codes containing
    /// exactly one exit.
    pub fn from_codes(index: usize, rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::Empty { level: index });
        }

        let mut parsed = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(LevelError::Ragged {
                    level: index,
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }

            let mut parsed_row = Vec::with_capacity(row.len());
            for (column, &code) in row.iter().enumerate() {
                let value = LevelCode::from_code(code).ok_or(LevelError::UnknownCode {
                    level: index,
                    row: row_index,
                    column,
                    code,
                })?;
                parsed_row.push(value);
            }
            parsed.push(parsed_row);
        }

        let exit = find_exit(index, rows)?;
        let exits = rows
            .iter()
            .flatten()
            .filter(|&&code| code == LevelCode::Exit.code())
            .count();
        if exits > 1 {
            return Err(LevelError::DuplicateExit {
                level: index,
                count: exits,
            });
        }

        let cells = Grid::from_rows(parsed).ok_or(LevelError::Empty { level: index })?;
        Ok(Self { cells, exit })
    }

    /// Number of authored columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.cells.width()
    }

    /// Number of authored rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.cells.height()
    }

    /// Exit location relative to the authored grid.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Authored cells.
    #[must_use]
    pub const fn cells(&self) -> &Grid<LevelCode> {
        &self.cells
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for code in row {
                write!(f, "{}", code.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Locates the first cell carrying the exit code, scanning rows top to bottom.
pub fn find_exit(level: usize, rows: &[Vec<u8>]) -> Result<CellCoord, LevelError> {
    let exit = LevelCode::Exit.code();
    rows.iter()
        .enumerate()
        .find_map(|(row, line)| {
            let column = line.iter().position(|&code| code == exit)?;
            Some(CellCoord::new(
                u32::try_from(column).ok()?,
                u32::try_from(row).ok()?,
            ))
        })
        .ok_or(LevelError::MissingExit { level })
}

/// Provider of authored levels, queried once per level transition.
pub trait LevelSource: fmt::Debug {
    /// Level at `index`, or `None` once the authored levels are exhausted.
    fn level(&self, index: usize) -> Option<Level>;

    /// Number of levels the source can provide.
    fn len(&self) -> usize;

    /// Reports whether the source provides no levels at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reasons authored level data may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The level source did not provide a first level.
    #[error("no levels available")]
    NoLevels,
    /// The level contained no cells.
    #[error("level {level} is empty")]
    Empty {
        /// Index of the rejected level.
        level: usize,
    },
    /// A row had a different length from the first row.
    #[error("level {level} row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the rejected level.
        level: usize,
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A cell held a code other than open, wall or exit.
    #[error("level {level} has unknown code {code} at row {row}, column {column}")]
    UnknownCode {
        /// Index of the rejected level.
        level: usize,
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Offending code.
        code: u8,
    },
    /// No cell carried the exit code.
    #[error("level {level} has no exit")]
    MissingExit {
        /// Index of the rejected level.
        level: usize,
    },
    /// More than one cell carried the exit code.
    #[error("level {level} has {count} exits, expected exactly one")]
    DuplicateExit {
        /// Index of the rejected level.
        level: usize,
        /// Number of exit cells found.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_exit_reports_row_and_column() {
        let rows = vec![vec![0, 1, 0], vec![0, 0, 9]];
        assert_eq!(find_exit(0, &rows), Ok(CellCoord::new(2, 1)));
    }

    #[test]
    fn find_exit_fails_without_exit_code() {
        let rows = vec![vec![0, 1], vec![1, 0]];
        assert_eq!(find_exit(3, &rows), Err(LevelError::MissingExit { level: 3 }));
    }

    #[test]
    fn from_codes_rejects_unknown_codes() {
        let rows = vec![vec![0, 2], vec![0, 9]];
        assert_eq!(
            Level::from_codes(0, &rows),
            Err(LevelError::UnknownCode {
                level: 0,
                row: 0,
                column: 1,
                code: 2,
            })
        );
    }

    #[test]
    fn from_codes_rejects_ragged_rows() {
        let rows = vec![vec![0, 0, 0], vec![0, 9]];
        assert!(matches!(
            Level::from_codes(1, &rows),
            Err(LevelError::Ragged {
                level: 1,
                row: 1,
                expected: 3,
                found: 2,
            })
        ));
    }

    #[test]
    fn from_codes_rejects_second_exit() {
        let rows = vec![vec![9, 0], vec![0, 9]];
        assert_eq!(
            Level::from_codes(0, &rows),
            Err(LevelError::DuplicateExit { level: 0, count: 2 })
        );
    }

    #[test]
    fn level_display_prints_authored_codes() {
        let level = Level::from_codes(0, &[vec![0, 1], vec![0, 9]]).expect("valid level");
        assert_eq!(level.to_string(), "01\n09\n");
        assert_eq!(level.width(), 2);
        assert_eq!(level.height(), 2);
        assert_eq!(level.exit(), CellCoord::new(1, 1));
    }
}
