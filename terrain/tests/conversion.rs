use proptest::prelude::*;
use worms_core::{CellCoord, GeometryError, Position};
use worms_terrain::{TerrainMap, EDGE_EPSILON};

fn at(x: f64, y: f64) -> Position {
    Position::new(x, y).expect("finite coordinates")
}

/// Four by three meter world over the twelve by six reference bitmap.
fn reference_world() -> TerrainMap {
    let (t, f) = (true, false);
    let mut rows = vec![vec![t; 12]; 6];
    for row in &mut rows {
        row[11] = f;
    }
    rows[2] = vec![t, t, t, f, f, f, f, t, f, f, f, f];
    rows[3][2] = f;
    rows[4][0] = f;
    rows[4][1] = f;
    rows[4][2] = f;
    TerrainMap::new(4.0, 3.0, rows).expect("valid reference world")
}

#[test]
fn interior_point_maps_to_expected_cell_and_back() {
    let map = reference_world();

    let cell = map.world_to_grid(at(1.0, 1.0)).expect("inside the world");
    assert_eq!(cell, CellCoord::new(3, map.rows() - 2));

    let corner = map.grid_to_world(cell).expect("valid cell");
    assert!((corner.x() - 1.0).abs() < 1e-12);
    assert!((corner.y() - 1.0).abs() < 1e-12);
}

#[test]
fn world_corners_resolve_to_corner_cells() {
    let map = reference_world();

    assert_eq!(map.world_to_grid(at(0.0, 0.0)), Ok(CellCoord::new(0, 5)));
    assert_eq!(map.world_to_grid(at(4.0, 3.0)), Ok(CellCoord::new(11, 0)));
    assert_eq!(map.world_to_grid(at(4.0, 0.0)), Ok(CellCoord::new(11, 5)));
    assert_eq!(map.world_to_grid(at(0.0, 3.0)), Ok(CellCoord::new(0, 0)));
}

#[test]
fn points_outside_the_world_are_rejected() {
    let map = reference_world();

    assert_eq!(
        map.world_to_grid(at(-0.5, 1.0)),
        Err(GeometryError::OutOfBounds { x: -0.5, y: 1.0 })
    );
    assert!(map.world_to_grid(at(1.0, 3.5)).is_err());
}

#[test]
fn far_edge_cells_are_accepted_and_beyond_rejected() {
    let map = reference_world();

    let far = map.grid_to_world(CellCoord::new(12, 6)).expect("far corner");
    assert!((far.x() - 4.0).abs() < 1e-12);
    assert!(far.y().abs() < 1e-12);

    assert_eq!(
        map.grid_to_world(CellCoord::new(13, 0)),
        Err(GeometryError::CellOutOfBounds { column: 13, row: 0 })
    );
    assert!(map.grid_to_world(CellCoord::new(0, 7)).is_err());
}

#[test]
fn bitmap_is_read_with_row_zero_at_the_top() {
    let map = reference_world();

    assert!(!map.is_cell_passable(CellCoord::new(3, 2)));
    assert!(map.is_cell_passable(CellCoord::new(7, 2)));
    let low_left = map.world_to_grid(at(0.1, 0.6)).expect("inside the world");
    assert_eq!(low_left, CellCoord::new(0, 4));
    assert!(!map.is_cell_passable(low_left));
}

fn arbitrary_map() -> impl Strategy<Value = TerrainMap> {
    (1.0f64..50.0, 1.0f64..50.0, 1usize..40, 1usize..40).prop_map(
        |(width, height, columns, rows)| {
            TerrainMap::new(width, height, vec![vec![true; columns]; rows])
                .expect("generated dimensions are valid")
        },
    )
}

proptest! {
    #[test]
    fn round_trip_stays_within_one_cell(
        map in arbitrary_map(),
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let position = at(fx * map.width(), fy * map.height());
        let cell = map.world_to_grid(position).expect("inside the world");
        let corner = map.grid_to_world(cell).expect("cell inside the bitmap");
        let tolerance = 1e-9 + EDGE_EPSILON;

        let dx = position.x() - corner.x();
        let dy = corner.y() - position.y();
        prop_assert!(dx >= -tolerance && dx <= map.column_extent() + tolerance);
        prop_assert!(dy >= -tolerance && dy <= map.row_extent() + tolerance);
    }

    #[test]
    fn every_point_inside_the_world_has_a_cell(
        map in arbitrary_map(),
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let position = at(fx * map.width(), fy * map.height());
        let cell = map.world_to_grid(position).expect("inside the world");
        prop_assert!(cell.column() < map.columns());
        prop_assert!(cell.row() < map.rows());
    }
}
