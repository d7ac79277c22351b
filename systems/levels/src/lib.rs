#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level data provider for Fog Maze.
//!
//! [`LevelCatalog`] serves validated [`Level`] values to the world, either
//! from the authored mazes compiled into the game or from a TOML level pack:
//!
//! ```toml
//! [[levels]]
//! rows = ["0100", "0009"]
//! ```
//!
//! Each character of a row is a single authored code: `0` open, `1` wall and
//! `9` exit.

mod builtin;

use std::{
    fs,
    path::{Path, PathBuf},
};

use fog_maze_core::{Level, LevelError, LevelSource};
use serde::Deserialize;
use thiserror::Error;

/// Ordered collection of validated levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Catalogue of the mazes shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        let rows: Vec<&[&str]> = builtin::ALL.to_vec();
        Self::from_text_rows(&rows)
    }

    /// Wraps levels that were already validated.
    #[must_use]
    pub fn from_levels(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Validates levels given as rows of digit strings.
    pub fn from_text_rows<S: AsRef<str>>(levels: &[&[S]]) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut parsed = Vec::with_capacity(levels.len());
        for (index, rows) in levels.iter().enumerate() {
            let codes = parse_rows(index, rows)?;
            parsed.push(Level::from_codes(index, &codes)?);
        }
        Ok(Self { levels: parsed })
    }

    /// Parses a TOML level pack.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let pack: LevelPack = toml::from_str(contents)?;
        let rows: Vec<&[String]> = pack
            .levels
            .iter()
            .map(|level| level.rows.as_slice())
            .collect();
        let catalog = Self::from_text_rows(&rows)?;
        log::debug!("parsed level pack with {} levels", catalog.levels.len());
        Ok(catalog)
    }

    /// Reads and parses the TOML level pack at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validated levels in play order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

impl LevelSource for LevelCatalog {
    fn level(&self, index: usize) -> Option<Level> {
        self.levels.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.levels.len()
    }
}

#[derive(Debug, Deserialize)]
struct LevelPack {
    levels: Vec<LevelRows>,
}

#[derive(Debug, Deserialize)]
struct LevelRows {
    rows: Vec<String>,
}

fn parse_rows<S: AsRef<str>>(level: usize, rows: &[S]) -> Result<Vec<Vec<u8>>, CatalogError> {
    rows.iter()
        .enumerate()
        .map(|(row, line)| {
            line.as_ref()
                .chars()
                .enumerate()
                .map(|(column, character)| {
                    character
                        .to_digit(10)
                        .map(|digit| digit as u8)
                        .ok_or(CatalogError::InvalidCharacter {
                            level,
                            row,
                            column,
                            character,
                        })
                })
                .collect()
        })
        .collect()
}

/// Errors raised while loading a level catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalogue contained no levels.
    #[error("level pack contains no levels")]
    Empty,
    /// The level pack file could not be read.
    #[error("could not read level pack {}", path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The level pack was not valid TOML or did not match the expected layout.
    #[error("could not parse level pack")]
    Parse(#[from] toml::de::Error),
    /// A row contained something other than a decimal digit.
    #[error("level {level} row {row} column {column} holds '{character}', expected a digit")]
    InvalidCharacter {
        /// Index of the rejected level.
        level: usize,
        /// Row of the offending character.
        row: usize,
        /// Column of the offending character.
        column: usize,
        /// Offending character.
        character: char,
    },
    /// The digits did not describe a valid level.
    #[error(transparent)]
    Level(#[from] LevelError),
}
