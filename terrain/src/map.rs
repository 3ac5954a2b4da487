//! Passability bitmap and coordinate conversion.

use worms_core::{CellCoord, GeometryError, Position, ValueError};

use crate::TerrainView;

/// Nudge applied to coordinates lying exactly on a world edge before they are
/// mapped onto the grid, so the edge resolves to the cell inside the world.
pub const EDGE_EPSILON: f64 = 1e-4;

/// Immutable rectangular world paired with its passability bitmap.
///
/// The bitmap is stored row-major with row zero at the top of the world while
/// world coordinates grow upwards, so conversions flip the vertical axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    width: f64,
    height: f64,
    columns: u32,
    rows: u32,
    column_extent: f64,
    row_extent: f64,
    cells: Vec<bool>,
}

impl TerrainMap {
    /// Creates a terrain map spanning `width` × `height` meters.
    ///
    /// `rows` lists the bitmap from the top row down; `true` marks a passable
    /// cell. The bitmap must be non-empty and rectangular.
    pub fn new(width: f64, height: f64, rows: Vec<Vec<bool>>) -> Result<Self, ValueError> {
        let dimensions_valid =
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !dimensions_valid {
            return Err(ValueError::InvalidDimensions { width, height });
        }

        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(ValueError::EmptyBitmap);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ValueError::RaggedBitmap {
                    row: index,
                    found: row.len(),
                    expected,
                });
            }
            cells.extend_from_slice(row);
        }

        let columns =
            u32::try_from(expected).map_err(|_| ValueError::InvalidDimensions { width, height })?;
        let row_count =
            u32::try_from(rows.len()).map_err(|_| ValueError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            columns,
            rows: row_count,
            column_extent: width / f64::from(columns),
            row_extent: height / f64::from(row_count),
            cells,
        })
    }

    /// Width of the world in meters.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Height of the world in meters.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Number of bitmap columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of bitmap rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Horizontal extent of a single cell in meters.
    #[must_use]
    pub const fn column_extent(&self) -> f64 {
        self.column_extent
    }

    /// Vertical extent of a single cell in meters.
    #[must_use]
    pub const fn row_extent(&self) -> f64 {
        self.row_extent
    }

    /// Position of the world's centre.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::ORIGIN.translated(self.width / 2.0, self.height / 2.0)
    }

    /// Reports whether the position lies inside the world, edges included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (0.0..=self.width).contains(&position.x()) && (0.0..=self.height).contains(&position.y())
    }

    /// Reports whether the cell is passable.
    ///
    /// Indices beyond the bitmap are clamped onto its last column and row.
    #[must_use]
    pub fn is_cell_passable(&self, cell: CellCoord) -> bool {
        let clamped = CellCoord::new(
            cell.column().min(self.columns - 1),
            cell.row().min(self.rows - 1),
        );
        self.index(clamped)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Maps a world position onto the cell that contains it.
    pub fn world_to_grid(&self, position: Position) -> Result<CellCoord, GeometryError> {
        if !self.contains(position) {
            return Err(GeometryError::OutOfBounds {
                x: position.x(),
                y: position.y(),
            });
        }

        let x = pull_inside(position.x(), self.width);
        let y = pull_inside(position.y(), self.height);
        let column = (x / self.column_extent).floor();
        let row = f64::from(self.rows) - (y / self.row_extent).ceil();

        Ok(CellCoord::new(
            clamp_index(column, self.columns),
            clamp_index(row, self.rows),
        ))
    }

    /// Maps a cell onto the world position of its top-left corner.
    ///
    /// Indices equal to the column or row count are accepted and denote the
    /// far edges of the world.
    pub fn grid_to_world(&self, cell: CellCoord) -> Result<Position, GeometryError> {
        if cell.column() > self.columns || cell.row() > self.rows {
            return Err(GeometryError::CellOutOfBounds {
                column: cell.column(),
                row: cell.row(),
            });
        }

        Ok(Position::ORIGIN.translated(
            f64::from(cell.column()) * self.column_extent,
            self.height - f64::from(cell.row()) * self.row_extent,
        ))
    }

    /// Spatial query handle borrowing this map.
    #[must_use]
    pub fn view(&self) -> TerrainView<'_> {
        TerrainView::new(self)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn pull_inside(coordinate: f64, extent: f64) -> f64 {
    if coordinate == 0.0 {
        EDGE_EPSILON
    } else if coordinate == extent {
        extent - EDGE_EPSILON
    } else {
        coordinate
    }
}

fn clamp_index(value: f64, count: u32) -> u32 {
    value.max(0.0).min(f64::from(count - 1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(columns: usize, rows: usize) -> Vec<Vec<bool>> {
        vec![vec![true; columns]; rows]
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(
            TerrainMap::new(0.0, 3.0, open(2, 2)),
            Err(ValueError::InvalidDimensions { .. })
        ));
        assert!(TerrainMap::new(-4.0, 3.0, open(2, 2)).is_err());
        assert!(TerrainMap::new(4.0, f64::INFINITY, open(2, 2)).is_err());
        assert!(TerrainMap::new(f64::NAN, 3.0, open(2, 2)).is_err());
    }

    #[test]
    fn rejects_empty_bitmaps() {
        assert_eq!(TerrainMap::new(4.0, 3.0, Vec::new()), Err(ValueError::EmptyBitmap));
        assert_eq!(
            TerrainMap::new(4.0, 3.0, vec![Vec::new(), Vec::new()]),
            Err(ValueError::EmptyBitmap)
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![true; 3], vec![true; 3], vec![true; 2]];
        assert_eq!(
            TerrainMap::new(4.0, 3.0, rows),
            Err(ValueError::RaggedBitmap {
                row: 2,
                found: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn computes_cell_extents_once() {
        let map = TerrainMap::new(4.0, 3.0, open(12, 6)).expect("valid map");
        assert_eq!(map.columns(), 12);
        assert_eq!(map.rows(), 6);
        assert!((map.column_extent() - 1.0 / 3.0).abs() < 1e-12);
        assert!((map.row_extent() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cell_lookups_clamp_to_the_far_edges() {
        let mut rows = open(3, 2);
        rows[1][2] = false;
        let map = TerrainMap::new(3.0, 2.0, rows).expect("valid map");

        assert!(!map.is_cell_passable(CellCoord::new(2, 1)));
        assert!(!map.is_cell_passable(CellCoord::new(40, 1)));
        assert!(!map.is_cell_passable(CellCoord::new(2, 17)));
        assert!(map.is_cell_passable(CellCoord::new(0, 9)));
    }

    #[test]
    fn containment_includes_the_edges() {
        let map = TerrainMap::new(4.0, 3.0, open(4, 3)).expect("valid map");
        let at = |x, y| Position::new(x, y).expect("finite");

        assert!(map.contains(at(0.0, 0.0)));
        assert!(map.contains(at(4.0, 3.0)));
        assert!(!map.contains(at(4.01, 1.0)));
        assert!(!map.contains(at(1.0, -0.01)));
    }
}
