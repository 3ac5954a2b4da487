#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that plans a single worm step along the terrain.
//!
//! The planner never mutates anything: it inspects the ground ahead of the
//! walker and reports whether, where and at what cost the walker may move.
//! Charging action points and eating food is left to the world.

use worms_core::{cost_of_step, CommandError, Direction, Points, Position};
use worms_terrain::TerrainView;

/// Largest angle between facing and ground a worm can step at, and the widest
/// deviation from its facing it will try.
pub const MAX_STEP_DEVIATION: f64 = 0.7875;

/// Angular increment between alternative step headings.
pub const HEADING_INCREMENT: f64 = 0.0175;

/// Worm about to take a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walker {
    /// Centre of the worm's body.
    pub position: Position,
    /// Radius of the worm's body; also the length of a full step.
    pub radius: f64,
    /// Facing of the worm.
    pub direction: Direction,
    /// Action points available for the step.
    pub action_points: Points,
}

/// Result of planning a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// No heading near the facing leaves room to move, or no ground lies ahead.
    Blocked,
    /// The walker cannot afford the step.
    Exhausted {
        /// Action points the step would cost.
        cost: Points,
    },
    /// The walker may move.
    Advance {
        /// Position reached by the step.
        destination: Position,
        /// Heading actually travelled, in radians.
        heading: f64,
        /// Distance travelled.
        distance: f64,
        /// Action points charged.
        cost: Points,
    },
}

/// Plans one step for `walker` over `terrain`.
///
/// Fails with [`CommandError::IllegalStep`] when the ground ahead is too steep
/// for the walker's facing. Otherwise headings fanning out from the facing are
/// tried, nearest first, and the first that leaves room to move wins.
pub fn plan_step(walker: &Walker, terrain: TerrainView<'_>) -> Result<StepOutcome, CommandError> {
    let Ok(slope) = terrain.ground_slope(walker.position, walker.direction, walker.radius) else {
        return Ok(StepOutcome::Blocked);
    };

    let facing = walker.direction.radians();
    if (facing - slope).sin().abs() > MAX_STEP_DEVIATION.sin() {
        return Err(CommandError::IllegalStep);
    }

    let chosen = candidate_headings(facing).find_map(|heading| {
        let distance =
            terrain.max_travel_distance(walker.radius, heading, walker.radius, walker.position);
        (distance > 0.0).then_some((heading, distance))
    });
    let Some((heading, distance)) = chosen else {
        return Ok(StepOutcome::Blocked);
    };

    let cost = cost_of_step(slope);
    if walker.action_points < cost {
        return Ok(StepOutcome::Exhausted { cost });
    }

    Ok(StepOutcome::Advance {
        destination: walker.position.offset(distance, heading),
        heading,
        distance,
        cost,
    })
}

fn candidate_headings(facing: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(|step| f64::from(step) * HEADING_INCREMENT)
        .take_while(|deviation| *deviation < MAX_STEP_DEVIATION)
        .flat_map(move |deviation| {
            let mirrored = (deviation > 0.0).then_some(facing - deviation);
            std::iter::once(facing + deviation).chain(mirrored)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_fan_out_from_the_facing() {
        let headings: Vec<f64> = candidate_headings(1.0).take(5).collect();
        let expected = [1.0, 1.0175, 0.9825, 1.035, 0.965];
        for (heading, expected) in headings.iter().zip(expected) {
            assert!((heading - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn fan_stays_within_the_deviation_limit() {
        let headings: Vec<f64> = candidate_headings(0.0).collect();
        assert_eq!(headings.len(), 89);
        assert!(headings
            .iter()
            .all(|heading| heading.abs() < MAX_STEP_DEVIATION));
    }
}
