use std::f64::consts::PI;

use proptest::prelude::*;
use worms_core::{Direction, GeometryError, Position};
use worms_terrain::{TerrainMap, EDGE_EPSILON};

fn at(x: f64, y: f64) -> Position {
    Position::new(x, y).expect("finite coordinates")
}

fn facing(radians: f64) -> Direction {
    Direction::new(radians).expect("valid direction")
}

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

/// Five by six meter world with a single impassable cell in its middle.
fn pillar_world() -> TerrainMap {
    let mut rows = vec![vec![true; 5]; 6];
    rows[2][2] = false;
    TerrainMap::new(5.0, 6.0, rows).expect("valid pillar world")
}

/// Twenty by ten meter world whose ground surface lies at y = 2.
fn flat_world() -> TerrainMap {
    let mut rows = vec![vec![true; 40]; 16];
    rows.extend(vec![vec![false; 40]; 4]);
    TerrainMap::new(20.0, 10.0, rows).expect("valid flat world")
}

#[test]
fn points_outside_the_world_are_passable() {
    let map = flat_world();
    let view = map.view();

    assert!(view.is_passable(at(-3.0, 0.5)));
    assert!(view.is_passable(at(5.0, -1.0)));
    assert!(!view.is_passable(at(5.0, 1.0)));
    assert!(view.is_passable(at(5.0, 3.0)));
}

#[test]
fn circles_fit_only_between_walls() {
    let map = reference_world();
    let view = map.view();
    let x = 4.0 / 3.0 - EDGE_EPSILON;

    assert!(view.is_passable_for_circle(0.0, 0.25, at(x, 2.5 - EDGE_EPSILON)));
    assert!(view.is_passable_for_circle(0.0, 0.25, at(x, 2.25 + EDGE_EPSILON)));
    assert!(view.is_passable_for_circle(0.0, 0.4, at(x, 2.5 - EDGE_EPSILON)));
    assert!(!view.is_passable_for_circle(0.0, 0.4, at(x, 2.1 - EDGE_EPSILON)));
    assert!(!view.is_passable_for_circle(0.0, 0.4, at(x, 1.5 - EDGE_EPSILON)));
}

#[test]
fn negative_outer_radius_is_never_passable() {
    let map = flat_world();
    assert!(!map.view().is_passable_for_circle(0.0, -0.1, at(5.0, 5.0)));
}

#[test]
fn passable_centre_does_not_make_a_passable_circle() {
    let map = pillar_world();
    let view = map.view();

    assert!(view.is_passable(at(2.0, 2.9)));
    assert!(!view.is_passable_for_circle(0.0, 2.0, at(2.0, 2.9)));
    assert!(view.is_passable(at(2.0, 2.0)));
    assert!(!view.is_passable_for_circle(0.0, 2.0, at(2.0, 2.0)));
}

#[test]
fn adjacency_requires_touching_the_ground_from_above() {
    let map = reference_world();
    let view = map.view();

    assert!(view.is_adjacent(0.25, at(4.0 / 3.0, 2.26)));
    assert!(view.is_adjacent(0.5, at(4.0 / 3.0, 2.54)));
    assert!(!view.is_adjacent(0.25, at(4.0 / 3.0 - EDGE_EPSILON, 2.5 - EDGE_EPSILON)));
}

#[test]
fn adjacency_band_on_flat_ground() {
    let map = flat_world();
    let view = map.view();

    for y in [2.255, 2.26, 2.27] {
        assert!(view.is_adjacent(0.25, at(5.0, y)), "expected adjacency at y = {y}");
    }
    for y in [2.25, 2.28, 2.3] {
        assert!(!view.is_adjacent(0.25, at(5.0, y)), "unexpected adjacency at y = {y}");
    }
    assert!(view.is_adjacent(0.25, at(8.0, 2.26)));
}

#[test]
fn adjacency_rejects_degenerate_radii() {
    let map = flat_world();
    let view = map.view();

    assert!(!view.is_adjacent(0.0, at(5.0, 2.26)));
    assert!(!view.is_adjacent(-0.25, at(5.0, 2.26)));
    assert!(!view.is_adjacent(5.5, at(10.0, 7.5)));
}

#[test]
fn circles_near_the_border_leave_the_world() {
    let map = flat_world();
    let view = map.view();

    assert!(view.circle_in_world(0.25, at(5.0, 2.26)));
    assert!(!view.circle_in_world(0.25, at(0.1, 5.0)));
    assert!(!view.circle_in_world(0.25, at(10.0, 9.9)));
}

#[test]
fn travel_is_capped_by_the_requested_distance() {
    let map = flat_world();
    let view = map.view();

    let distance = view.max_travel_distance(0.25, 0.0, 0.25, at(5.0, 2.26));
    assert!((distance - 0.25).abs() < 1e-12);
}

#[test]
fn travel_into_the_ground_is_blocked() {
    let map = flat_world();
    let view = map.view();

    assert_eq!(view.max_travel_distance(0.25, -PI / 2.0, 0.25, at(5.0, 2.26)), 0.0);
}

#[test]
fn unobstructed_travel_returns_any_requested_distance() {
    let map = flat_world();
    let view = map.view();

    assert_eq!(view.max_travel_distance(0.25, PI / 2.0, 1e12, at(5.0, 2.26)), 1e12);

    let inbound = view.max_travel_distance(0.25, PI, 1e12, at(30.0, 1.0));
    assert!(inbound > 9.7 && inbound < 9.76, "stopped at {inbound}");
}

#[test]
fn travel_stops_short_of_a_wall() {
    let mut rows = vec![vec![true; 40]; 16];
    rows.extend(vec![vec![false; 40]; 4]);
    for row in rows.iter_mut().take(16) {
        row[12] = false;
    }
    let map = TerrainMap::new(20.0, 10.0, rows).expect("valid walled world");
    let view = map.view();

    let distance = view.max_travel_distance(0.25, 0.0, 2.0, at(5.0, 4.0));
    assert!((distance - 0.74).abs() < 1e-9);
    assert!(view.is_passable_for_circle(0.25, 0.25, at(5.0 + distance, 4.0)));
}

#[test]
fn slope_on_flat_ground_follows_the_averaged_surface() {
    let map = flat_world();
    let view = map.view();

    let right = view
        .ground_slope(at(5.0, 2.26), facing(0.0), 0.25)
        .expect("slope defined");
    let left = view
        .ground_slope(at(5.0, 2.26), facing(PI), 0.25)
        .expect("slope defined");

    assert!((right - -0.179_853_499_792).abs() < 1e-9);
    assert!((left - -2.961_739_153_797).abs() < 1e-9);
}

#[test]
fn slope_probes_outside_the_world_fail() {
    let map = flat_world();
    let view = map.view();

    assert!(matches!(
        view.ground_slope(at(19.0, 2.26), facing(0.0), 0.25),
        Err(GeometryError::OutOfBounds { .. })
    ));
}

#[test]
fn slope_scans_starting_on_the_boundary_fail() {
    let open = TerrainMap::new(20.0, 10.0, vec![vec![true; 40]; 20]).expect("valid map");
    let solid = TerrainMap::new(20.0, 10.0, vec![vec![false; 40]; 20]).expect("valid map");

    assert!(matches!(
        open.view().ground_slope(at(5.0, 0.25), facing(0.0), 0.25),
        Err(GeometryError::OutOfBounds { .. })
    ));
    assert!(matches!(
        solid.view().ground_slope(at(5.0, 10.25), facing(0.0), 0.25),
        Err(GeometryError::OutOfBounds { .. })
    ));
}

#[test]
fn falling_depends_on_support_below() {
    let map = flat_world();
    let view = map.view();

    assert!(view.can_fall(0.25, at(5.0, 5.0)));
    assert!(view.can_fall(0.25, at(5.0, 2.26)));
    assert!(!view.can_fall(0.25, at(5.0, 2.2)));
}

fn arbitrary_bitmap() -> impl Strategy<Value = TerrainMap> {
    (1usize..16, 1usize..16, any::<u64>()).prop_map(|(columns, rows, bits)| {
        let bitmap = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| (bits >> ((row * columns + column) % 64)) & 1 == 1)
                    .collect()
            })
            .collect();
        TerrainMap::new(8.0, 6.0, bitmap).expect("generated bitmap is rectangular")
    })
}

proptest! {
    #[test]
    fn zero_radius_circle_agrees_with_point_query(
        map in arbitrary_bitmap(),
        x in -1.0f64..9.0,
        y in -1.0f64..7.0,
    ) {
        let view = map.view();
        let position = at(x, y);
        if view.is_passable_for_circle(0.0, 0.0, position) {
            prop_assert!(view.is_passable(position));
        }
    }

    #[test]
    fn free_discs_have_a_free_centre(
        map in arbitrary_bitmap(),
        x in 0.0f64..8.0,
        y in 0.0f64..6.0,
        radius in 0.0f64..2.0,
    ) {
        let view = map.view();
        let position = at(x, y);
        if view.is_passable_for_circle(0.0, radius, position) {
            prop_assert!(view.is_passable(position));
        }
    }
}
