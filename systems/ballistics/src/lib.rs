#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure ballistic motion shared by jumping worms and fired projectiles.
//!
//! A [`Trajectory`] is the closed-form parabola of a body launched from an
//! origin. [`Trajectory::flight`] samples it at a fixed interval against the
//! terrain and a set of [`Target`] circles to find where the flight ends.

use worms_core::{
    launch_speed, Direction, EntityId, GeometryError, PhysicsConfig, Points, Position, WeaponKind,
};
use worms_terrain::TerrainView;

/// Circle a projectile may strike during its flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Entity owning the circle.
    pub id: EntityId,
    /// Centre of the circle.
    pub position: Position,
    /// Radius of the circle.
    pub radius: f64,
}

/// Reason a sampled flight stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightEnd {
    /// The body was launched downwards and never left its origin.
    Grounded,
    /// The next sample collided with terrain.
    Terrain,
    /// The next sample left the world rectangle.
    LeftWorld,
    /// The next sample overlapped the target with this identifier.
    Struck(EntityId),
}

/// Outcome of a sampled flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flight {
    /// Time of the last sample that was still free, in seconds.
    pub duration: f64,
    /// Position of the body at `duration`.
    pub landing: Position,
    /// Reason the flight stopped.
    pub end: FlightEnd,
}

/// Parabolic path of a body launched from `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    origin: Position,
    direction: Direction,
    speed: f64,
    gravity: f64,
}

impl Trajectory {
    /// Creates a trajectory with an explicit initial speed.
    #[must_use]
    pub const fn new(origin: Position, direction: Direction, speed: f64, gravity: f64) -> Self {
        Self {
            origin,
            direction,
            speed,
            gravity,
        }
    }

    /// Trajectory of a worm pushing off with every remaining action point.
    #[must_use]
    pub fn for_jump(
        config: &PhysicsConfig,
        origin: Position,
        direction: Direction,
        action_points: Points,
        mass: f64,
    ) -> Self {
        let force = config.jump_force(action_points, mass);
        Self::new(origin, direction, launch_speed(force, mass), config.gravity)
    }

    /// Trajectory of a projectile fired by `weapon` at the given yield.
    #[must_use]
    pub fn for_projectile(
        config: &PhysicsConfig,
        origin: Position,
        direction: Direction,
        weapon: WeaponKind,
        propulsion_yield: u8,
    ) -> Self {
        let force = weapon.force_at_yield(propulsion_yield);
        let speed = launch_speed(force, weapon.projectile_mass());
        Self::new(origin, direction, speed, config.gravity)
    }

    /// Launch position.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Initial speed in meters per second.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Position of the body `time` seconds after launch.
    ///
    /// Bodies launched downwards stay at their origin.
    pub fn position_at(&self, time: f64) -> Result<Position, GeometryError> {
        if !time.is_finite() || time < 0.0 {
            return Err(GeometryError::InvalidTime(time));
        }
        if time == 0.0 || self.direction.is_facing_down() {
            return Ok(self.origin);
        }

        let angle = self.direction.radians();
        let x = self.origin.x() + self.speed * angle.cos() * time;
        let y = self.origin.y() + self.speed * angle.sin() * time
            - self.gravity / 2.0 * time * time;
        Ok(Position::ORIGIN.translated(x, y))
    }

    /// Samples the trajectory every `time_step` seconds until the body of
    /// `radius` leaves the world, meets terrain or overlaps one of `targets`.
    ///
    /// Targets are only tested after launch, in the order given. A step too
    /// fine to reach the ground within `u32::MAX` samples is rejected.
    pub fn flight(
        &self,
        time_step: f64,
        terrain: TerrainView<'_>,
        radius: f64,
        targets: &[Target],
    ) -> Result<Flight, GeometryError> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(GeometryError::InvalidTimeStep(time_step));
        }
        if self.direction.is_facing_down() {
            return Ok(Flight {
                duration: 0.0,
                landing: self.origin,
                end: FlightEnd::Grounded,
            });
        }
        if self.samples_until_grounded(time_step) > f64::from(u32::MAX) {
            return Err(GeometryError::InvalidTimeStep(time_step));
        }

        let mut duration = 0.0;
        let mut sample = 0u32;
        let end = loop {
            let time = f64::from(sample) * time_step;
            let position = self.position_at(time)?;

            if !terrain.map().contains(position) {
                break FlightEnd::LeftWorld;
            }
            if !terrain.is_passable_for_circle(radius, radius, position) {
                break FlightEnd::Terrain;
            }
            if time > 0.0 {
                let struck = targets
                    .iter()
                    .find(|target| target.position.distance_to(position) < target.radius + radius);
                if let Some(target) = struck {
                    break FlightEnd::Struck(target.id);
                }
            }

            duration = time;
            sample = sample
                .checked_add(1)
                .ok_or(GeometryError::InvalidTimeStep(time_step))?;
        };

        Ok(Flight {
            duration,
            landing: self.position_at(duration)?,
            end,
        })
    }

    /// Number of `time_step` samples before the body sinks below y = 0.
    fn samples_until_grounded(&self, time_step: f64) -> f64 {
        let climb = self.speed * self.direction.radians().sin();
        let height = self.origin.y().max(0.0);
        let airborne =
            (climb + (climb * climb + 2.0 * self.gravity * height).sqrt()) / self.gravity;
        airborne / time_step
    }
}
