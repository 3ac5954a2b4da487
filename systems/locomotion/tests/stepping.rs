use std::f64::consts::PI;

use worms_core::{CommandError, Direction, Points, Position};
use worms_system_locomotion::{plan_step, StepOutcome, Walker};
use worms_terrain::TerrainMap;

fn at(x: f64, y: f64) -> Position {
    Position::new(x, y).expect("finite coordinates")
}

fn walker(x: f64, y: f64, direction: f64, action_points: u32) -> Walker {
    Walker {
        position: at(x, y),
        radius: 0.25,
        direction: Direction::new(direction).expect("valid direction"),
        action_points: Points::new(action_points),
    }
}

fn ground_rows() -> Vec<Vec<bool>> {
    let mut rows = vec![vec![true; 40]; 16];
    rows.extend(vec![vec![false; 40]; 4]);
    rows
}

fn flat_world() -> TerrainMap {
    TerrainMap::new(20.0, 10.0, ground_rows()).expect("valid flat world")
}

#[test]
fn steps_a_full_radius_on_flat_ground() {
    let map = flat_world();

    let outcome = plan_step(&walker(5.0, 2.26, 0.0, 70), map.view()).expect("aligned step");

    let StepOutcome::Advance {
        destination,
        heading,
        distance,
        cost,
    } = outcome
    else {
        panic!("expected an advance, got {outcome:?}");
    };
    assert_eq!(heading, 0.0);
    assert!((distance - 0.25).abs() < 1e-12);
    assert!((destination.x() - 5.25).abs() < 1e-12);
    assert!((destination.y() - 2.26).abs() < 1e-12);
    assert_eq!(cost, Points::new(2));
}

#[test]
fn steps_left_when_facing_left() {
    let map = flat_world();

    let outcome = plan_step(&walker(5.0, 2.26, PI, 70), map.view()).expect("aligned step");

    let StepOutcome::Advance { destination, .. } = outcome else {
        panic!("expected an advance, got {outcome:?}");
    };
    assert!((destination.x() - 4.75).abs() < 1e-9);
}

#[test]
fn misaligned_step_is_refused() {
    let map = flat_world();

    assert_eq!(
        plan_step(&walker(5.0, 2.26, PI / 2.0, 70), map.view()),
        Err(CommandError::IllegalStep)
    );
}

#[test]
fn exhausted_walker_does_not_move() {
    let map = flat_world();

    assert_eq!(
        plan_step(&walker(5.0, 2.26, 0.0, 1), map.view()),
        Ok(StepOutcome::Exhausted {
            cost: Points::new(2)
        })
    );
}

#[test]
fn bump_in_front_blocks_every_heading() {
    let mut rows = ground_rows();
    rows[15][10] = false;
    let map = TerrainMap::new(20.0, 10.0, rows).expect("valid bumpy world");

    assert_eq!(
        plan_step(&walker(4.74, 2.26, 0.0, 70), map.view()),
        Ok(StepOutcome::Blocked)
    );
}

#[test]
fn missing_ground_ahead_blocks_the_step() {
    let map = flat_world();

    assert_eq!(
        plan_step(&walker(19.5, 2.26, 0.0, 70), map.view()),
        Ok(StepOutcome::Blocked)
    );
}
