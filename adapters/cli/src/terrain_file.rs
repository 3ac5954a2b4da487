use std::{error::Error, f64::consts::TAU, fmt};

use worms_core::ValueError;
use worms_terrain::TerrainMap;

/// Marks an impassable cell in a terrain file.
const SOLID: char = '#';
/// Marks a passable cell in a terrain file.
const OPEN: char = '.';
/// Lines starting with this character are ignored.
const COMMENT: char = ';';

/// Builds a terrain map from the ASCII bitmap in `source`.
///
/// The first line describes the top of the world. Blank lines and lines
/// starting with `;` are skipped; trailing whitespace is ignored.
pub(crate) fn parse(source: &str, width: f64, height: f64) -> Result<TerrainMap, TerrainFileError> {
    let mut rows = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let row = line
            .chars()
            .enumerate()
            .map(|(column, symbol)| match symbol {
                SOLID => Ok(false),
                OPEN => Ok(true),
                other => Err(TerrainFileError::UnknownSymbol {
                    line: index + 1,
                    column: column + 1,
                    symbol: other,
                }),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        rows.push(row);
    }

    TerrainMap::new(width, height, rows).map_err(TerrainFileError::InvalidTerrain)
}

/// Rolling hills over a solid floor, sized `columns` by `rows` cells.
pub(crate) fn default_landscape(columns: usize, rows: usize) -> Vec<Vec<bool>> {
    let base = rows as f64 / 4.0;
    let swell = rows as f64 / 8.0;
    let surface: Vec<usize> = (0..columns)
        .map(|column| {
            let phase = TAU * 2.0 * column as f64 / columns.max(1) as f64;
            let ground = (base + swell * phase.sin()).round().max(1.0) as usize;
            rows.saturating_sub(ground)
        })
        .collect();

    (0..rows)
        .map(|row| surface.iter().map(|top| row < *top).collect())
        .collect()
}

/// Errors that can occur while reading a terrain file.
#[derive(Debug)]
pub(crate) enum TerrainFileError {
    /// A character other than `#` or `.` appeared in the bitmap.
    UnknownSymbol {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// Offending character.
        symbol: char,
    },
    /// The bitmap did not describe a valid terrain.
    InvalidTerrain(ValueError),
}

impl fmt::Display for TerrainFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol {
                line,
                column,
                symbol,
            } => write!(
                f,
                "unexpected symbol {symbol:?} at line {line}, column {column}"
            ),
            Self::InvalidTerrain(error) => write!(f, "terrain bitmap is invalid: {error}"),
        }
    }
}

impl Error for TerrainFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTerrain(error) => Some(error),
            Self::UnknownSymbol { .. } => None,
        }
    }
}
