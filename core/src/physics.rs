//! Physical constants, weapon tables and action point formulas.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Points, ValueError};

/// Immutable physical configuration injected into the world at construction.
///
/// Every field has a default matching the classic rules, so a configuration
/// file only needs to name the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Density of worm bodies in kg/m³.
    pub worm_density: f64,
    /// Density of projectile bodies in kg/m³.
    pub projectile_density: f64,
    /// Smallest radius a worm may have, in meters.
    pub min_worm_radius: f64,
    /// Radius of every food item, in meters.
    pub food_radius: f64,
    /// Force contributed by each remaining action point when jumping, in newtons.
    pub jump_force_per_action_point: f64,
    /// Hit points restored to a worm when its turn begins.
    pub hit_point_regeneration: u32,
    /// Largest number of teams a world accepts.
    pub max_teams: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.806_65,
            worm_density: 1062.0,
            projectile_density: 7800.0,
            min_worm_radius: 0.25,
            food_radius: 0.2,
            jump_force_per_action_point: 5.0,
            hit_point_regeneration: 10,
            max_teams: 10,
        }
    }
}

impl PhysicsConfig {
    /// Checks that every setting describes a physically meaningful world.
    ///
    /// Gravity must be strictly positive so that every flight eventually
    /// leaves the world through its floor.
    pub fn validate(&self) -> Result<(), ValueError> {
        let positive = [
            ("gravity", self.gravity),
            ("worm_density", self.worm_density),
            ("projectile_density", self.projectile_density),
            ("min_worm_radius", self.min_worm_radius),
            ("food_radius", self.food_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValueError::InvalidConfig { field, value });
            }
        }
        let force = self.jump_force_per_action_point;
        if !force.is_finite() || force < 0.0 {
            return Err(ValueError::InvalidConfig {
                field: "jump_force_per_action_point",
                value: force,
            });
        }
        Ok(())
    }

    /// Mass of a spherical worm body with the provided radius.
    #[must_use]
    pub fn worm_mass(&self, radius: f64) -> f64 {
        self.worm_density * sphere_volume(radius)
    }

    /// Radius of a spherical projectile with the provided mass.
    #[must_use]
    pub fn projectile_radius(&self, mass: f64) -> f64 {
        ((3.0 * mass) / (4.0 * self.projectile_density * PI)).cbrt()
    }

    /// Force a worm pushes off with when jumping.
    #[must_use]
    pub fn jump_force(&self, action_points: Points, mass: f64) -> f64 {
        self.jump_force_per_action_point * f64::from(action_points.get()) + mass * self.gravity
    }
}

/// Maximum action and hit points of a worm with the provided mass.
///
/// Non-finite masses yield zero and oversized masses saturate.
#[must_use]
pub fn max_points_for_mass(mass: f64) -> Points {
    if !mass.is_finite() || mass <= 0.0 {
        return Points::ZERO;
    }
    let rounded = mass.round();
    if rounded >= f64::from(u32::MAX) {
        return Points::new(u32::MAX);
    }
    Points::new(rounded as u32)
}

/// Initial speed of a body launched with `force` newtons over half a second.
#[must_use]
pub fn launch_speed(force: f64, mass: f64) -> f64 {
    force * 0.5 / mass
}

/// Action points charged for turning by `angle` radians.
#[must_use]
pub fn cost_of_turn(angle: f64) -> Points {
    let cost = ((angle / (2.0 * PI)).abs() * 60.0).ceil();
    Points::new(cost as u32)
}

/// Action points charged for a single step over terrain sloped at `slope` radians.
#[must_use]
pub fn cost_of_step(slope: f64) -> Points {
    let cost = (slope.cos().abs() + 4.0 * slope.sin().abs()).ceil();
    Points::new(cost as u32)
}

fn sphere_volume(radius: f64) -> f64 {
    4.0 * PI * radius.powi(3) / 3.0
}

/// Weapons carried by every worm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Heavy launcher whose force scales with the propulsion yield.
    Bazooka,
    /// Light fixed-force rifle.
    Rifle,
}

impl WeaponKind {
    /// Weapons in the order a worm cycles through them.
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Bazooka, WeaponKind::Rifle];

    /// Force applied at a propulsion yield of 100, in newtons.
    #[must_use]
    pub const fn max_force(self) -> f64 {
        match self {
            Self::Bazooka => 9.5,
            Self::Rifle => 1.5,
        }
    }

    /// Force applied at a propulsion yield of 0, in newtons.
    #[must_use]
    pub const fn min_force(self) -> f64 {
        match self {
            Self::Bazooka => 2.5,
            Self::Rifle => 1.5,
        }
    }

    /// Mass of the projectile fired by the weapon, in kilograms.
    #[must_use]
    pub const fn projectile_mass(self) -> f64 {
        match self {
            Self::Bazooka => 0.3,
            Self::Rifle => 0.01,
        }
    }

    /// Action points consumed by firing.
    #[must_use]
    pub const fn action_point_cost(self) -> Points {
        match self {
            Self::Bazooka => Points::new(50),
            Self::Rifle => Points::new(10),
        }
    }

    /// Hit points removed from a worm struck by the projectile.
    #[must_use]
    pub const fn damage(self) -> Points {
        match self {
            Self::Bazooka => Points::new(80),
            Self::Rifle => Points::new(20),
        }
    }

    /// Force produced at the provided propulsion yield, a percentage.
    #[must_use]
    pub fn force_at_yield(self, propulsion_yield: u8) -> f64 {
        let spread = self.max_force() - self.min_force();
        self.min_force() + spread * f64::from(propulsion_yield) / 100.0
    }

    /// Weapon selected after this one when cycling.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Bazooka => Self::Rifle,
            Self::Rifle => Self::Bazooka,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_half_a_circle_costs_thirty() {
        assert_eq!(cost_of_turn(PI), Points::new(30));
        assert_eq!(cost_of_turn(-PI), Points::new(30));
        assert_eq!(cost_of_turn(0.0), Points::ZERO);
    }

    #[test]
    fn step_costs_follow_the_slope() {
        assert_eq!(cost_of_step(0.0), Points::new(1));
        assert_eq!(cost_of_step(PI / 4.0), Points::new(4));
        assert_eq!(cost_of_step(PI / 2.0), Points::new(4));
    }

    #[test]
    fn default_worm_has_seventy_points() {
        let config = PhysicsConfig::default();
        let mass = config.worm_mass(0.25);
        assert!((mass - 69.507_737).abs() < 1e-5);
        assert_eq!(max_points_for_mass(mass), Points::new(70));
    }

    #[test]
    fn max_points_saturate_and_reject_nonsense() {
        assert_eq!(max_points_for_mass(f64::NAN), Points::ZERO);
        assert_eq!(max_points_for_mass(1e12), Points::new(u32::MAX));
    }

    #[test]
    fn projectile_radii_match_weapon_masses() {
        let config = PhysicsConfig::default();
        let rifle = config.projectile_radius(WeaponKind::Rifle.projectile_mass());
        let bazooka = config.projectile_radius(WeaponKind::Bazooka.projectile_mass());
        assert!((rifle - 0.006_739).abs() < 1e-6);
        assert!((bazooka - 0.020_940).abs() < 1e-6);
    }

    #[test]
    fn bazooka_force_scales_with_yield() {
        assert!((WeaponKind::Bazooka.force_at_yield(0) - 2.5).abs() < 1e-12);
        assert!((WeaponKind::Bazooka.force_at_yield(100) - 9.5).abs() < 1e-12);
        assert!((WeaponKind::Rifle.force_at_yield(37) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(PhysicsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn weightless_worlds_are_rejected() {
        let config = PhysicsConfig {
            gravity: 0.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValueError::InvalidConfig {
                field: "gravity",
                value: 0.0,
            })
        );
    }

    #[test]
    fn weapons_cycle() {
        assert_eq!(WeaponKind::Bazooka.next(), WeaponKind::Rifle);
        assert_eq!(WeaponKind::Rifle.next(), WeaponKind::Bazooka);
    }
}
