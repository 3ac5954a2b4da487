//! Random search for a resting spot on the terrain.

use std::f64::consts::PI;

use rand::Rng;
use worms_core::Position;
use worms_terrain::TerrainView;

const RING_COUNT: u32 = 100;
const ANGLE_SAMPLES: u32 = 100;

/// Picks a uniform random point and sweeps shrinking circles around the
/// world's centre, starting at that point's distance, for the first position
/// where a circle of `radius` rests on the ground inside the world.
pub(crate) fn random_adjacent_position<R>(
    rng: &mut R,
    terrain: TerrainView<'_>,
    radius: f64,
) -> Option<Position>
where
    R: Rng + ?Sized,
{
    let map = terrain.map();
    let seed = Position::ORIGIN.translated(
        rng.gen_range(0.0..=map.width()),
        rng.gen_range(0.0..=map.height()),
    );
    let center = map.center();
    let reach = seed.distance_to(center);
    let shrink = reach / f64::from(RING_COUNT);

    (0..=RING_COUNT)
        .map(|ring| reach - f64::from(ring) * shrink)
        .flat_map(|distance| {
            (0..ANGLE_SAMPLES).map(move |k| center.offset(distance, f64::from(k) * PI / 50.0))
        })
        .find(|candidate| {
            terrain.circle_in_world(radius, *candidate) && terrain.is_adjacent(radius, *candidate)
        })
}
