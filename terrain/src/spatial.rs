//! Sampling queries answered against a terrain map.

use std::f64::consts::PI;

use worms_core::{Direction, GeometryError, Position};

use crate::TerrainMap;

const RING_SAMPLES: u32 = 20;

const ADJACENCY_GROWTH: f64 = 0.001;
const ADJACENCY_SPAN: f64 = 1.1;
const ADJACENCY_SAMPLES: u32 = 30;

const MIN_TRAVEL: f64 = 0.1;
const TRAVEL_STEP: f64 = 0.01;

const SLOPE_LOOKAHEAD: u32 = 10;

const FALL_SAMPLES: u32 = 6;

/// Read-only spatial query handle over a [`TerrainMap`].
///
/// Circles are probed ring by ring: rings start at an inner radius and grow
/// by the smaller cell extent until the outer radius, which is always probed
/// last. Each ring is sampled at twenty evenly spaced angles.
#[derive(Clone, Copy, Debug)]
pub struct TerrainView<'a> {
    map: &'a TerrainMap,
}

impl<'a> TerrainView<'a> {
    pub(crate) fn new(map: &'a TerrainMap) -> Self {
        Self { map }
    }

    /// Terrain map backing the view.
    #[must_use]
    pub fn map(&self) -> &'a TerrainMap {
        self.map
    }

    /// Reports whether a point may be occupied.
    ///
    /// Points outside the world are passable; only impassable cells block.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.map
            .world_to_grid(position)
            .map_or(true, |cell| self.map.is_cell_passable(cell))
    }

    /// Reports whether every ring between `inner` and `outer` around `center`
    /// samples only passable points.
    #[must_use]
    pub fn is_passable_for_circle(&self, inner: f64, outer: f64, center: Position) -> bool {
        if !inner.is_finite() || !outer.is_finite() || outer < 0.0 {
            return false;
        }
        self.rings(inner, outer).all(|radius| {
            ring_angles().all(|angle| self.is_passable(center.offset(radius, angle)))
        })
    }

    /// Reports whether every ring sample of the disc lies inside the world.
    #[must_use]
    pub fn circle_in_world(&self, radius: f64, center: Position) -> bool {
        if !radius.is_finite() || radius < 0.0 {
            return false;
        }
        self.rings(0.0, radius).all(|ring| {
            ring_angles().all(|angle| self.map.contains(center.offset(ring, angle)))
        })
    }

    /// Reports whether a free circle of `radius` rests against terrain below it.
    ///
    /// The circle itself must be free. Slightly larger arcs spanning the lower
    /// half are then probed; the circle is adjacent when one of them touches
    /// exactly one impassable sample.
    #[must_use]
    pub fn is_adjacent(&self, radius: f64, position: Position) -> bool {
        if !(radius > 0.0) || 2.0 * radius > self.map.width().min(self.map.height()) {
            return false;
        }
        if !self.is_passable_for_circle(0.0, radius, position) {
            return false;
        }

        (0u32..)
            .map(|step| radius + f64::from(step) * ADJACENCY_GROWTH)
            .take_while(|probe| *probe <= ADJACENCY_SPAN * radius)
            .any(|probe| self.blocked_below(probe, position) == 1)
    }

    /// Distance a circle of `radius` may travel from `position` along `heading`
    /// before its ring meets terrain, capped at `max_distance`.
    ///
    /// Returns zero when even the shortest probe is blocked.
    #[must_use]
    pub fn max_travel_distance(
        &self,
        radius: f64,
        heading: f64,
        max_distance: f64,
        position: Position,
    ) -> f64 {
        if !max_distance.is_finite() {
            return 0.0;
        }
        let blocked_at = |distance: f64| {
            !self.is_passable_for_circle(radius, radius, position.offset(distance, heading))
        };
        if blocked_at(MIN_TRAVEL) {
            return 0.0;
        }

        // Only offsets within `reach` of the centre can put the ring on terrain.
        let reach = self.map.width().hypot(self.map.height()) / 2.0 + radius;
        let span = position.distance_to(self.map.center());
        let limit = max_distance.min(span + reach);
        let mut step = ((span - reach - MIN_TRAVEL) / TRAVEL_STEP).ceil().max(1.0);
        loop {
            let distance = MIN_TRAVEL + step * TRAVEL_STEP;
            if distance > limit {
                return max_distance;
            }
            if blocked_at(distance) {
                return distance - TRAVEL_STEP;
            }
            step += 1.0;
        }
    }

    /// Slope of the ground ahead of a body resting at `position`, in radians.
    ///
    /// Surface heights are averaged over ten probes spaced one column apart
    /// in the facing direction and compared with the body's foot.
    pub fn ground_slope(
        &self,
        position: Position,
        direction: Direction,
        radius: f64,
    ) -> Result<f64, GeometryError> {
        let foot = position.translated(0.0, -radius);
        let facing_right = direction.is_facing_right();

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for lookahead in (1..=SLOPE_LOOKAHEAD).rev() {
            let reach = f64::from(lookahead) * self.map.column_extent();
            let probe_x = if facing_right {
                foot.x() + reach
            } else {
                foot.x() - reach
            };
            sum_y += self.surface_height(probe_x, foot.y())?;
            sum_x += probe_x;
        }

        let samples = f64::from(SLOPE_LOOKAHEAD);
        let (ahead_x, ahead_y) = (sum_x / samples, sum_y / samples);
        if ahead_x == foot.x() {
            return Ok((PI / 2.0).copysign(ahead_y - foot.y()));
        }

        let slope = ((foot.y() - ahead_y) / (foot.x() - ahead_x)).atan();
        if ahead_x < foot.x() {
            if ahead_y < foot.y() {
                return Ok(slope - PI);
            }
            return Ok(slope + PI);
        }
        Ok(slope)
    }

    /// Reports whether nothing supports a body of `radius` at `position`.
    ///
    /// Seven samples spread over the lower arc between 7π/6 and 11π/6 must
    /// all be passable.
    #[must_use]
    pub fn can_fall(&self, radius: f64, position: Position) -> bool {
        (0..=FALL_SAMPLES)
            .map(|k| 7.0 * PI / 6.0 + f64::from(k) * PI / 10.0)
            .all(|angle| self.is_passable(position.offset(radius, angle)))
    }

    fn blocked_below(&self, radius: f64, position: Position) -> usize {
        (0..=ADJACENCY_SAMPLES)
            .map(|k| 6.0 * PI / 5.0 + f64::from(k) * PI / 50.0)
            .filter(|angle| !self.is_passable(position.offset(radius, *angle)))
            .count()
    }

    fn surface_height(&self, x: f64, y: f64) -> Result<f64, GeometryError> {
        let probe = Position::ORIGIN.translated(x, y);
        let out_of_bounds = GeometryError::OutOfBounds { x, y };
        if !self.map.contains(probe) {
            return Err(out_of_bounds);
        }

        let passable = self.is_passable(probe);
        let (step, edge) = if passable {
            (-self.map.row_extent(), 0.0)
        } else {
            (self.map.row_extent(), self.map.height())
        };
        if y == edge {
            return Err(out_of_bounds);
        }

        let mut count = 1u32;
        loop {
            let sample_y = y + f64::from(count) * step;
            let sample = Position::ORIGIN.translated(x, sample_y);
            if !self.map.contains(sample) {
                return Ok(f64::INFINITY.copysign(step));
            }
            if self.is_passable(sample) != passable {
                return Ok(if passable { sample_y } else { sample_y - step });
            }
            count += 1;
        }
    }

    fn rings(&self, inner: f64, outer: f64) -> Rings {
        Rings {
            radius: inner,
            outer,
            step: self.map.column_extent().min(self.map.row_extent()),
            finished: false,
        }
    }
}

fn ring_angles() -> impl Iterator<Item = f64> {
    (0..RING_SAMPLES).map(|k| f64::from(k) * PI / 10.0)
}

/// Radii probed between an inner and an outer bound; the outer bound closes
/// the sequence even when the last increment overshoots it.
struct Rings {
    radius: f64,
    outer: f64,
    step: f64,
    finished: bool,
}

impl Iterator for Rings {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.finished {
            return None;
        }
        let radius = if self.radius > self.outer {
            self.finished = true;
            self.outer
        } else {
            self.radius
        };
        self.radius += self.step;
        Some(radius)
    }
}
