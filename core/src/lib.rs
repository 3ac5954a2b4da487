#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the worms artillery engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure physics systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes them
//! via its `apply` entry point and reports every change as an [`Event`].
//! Value types validate on construction so that an invalid radius, angle or
//! name never enters the simulation.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

mod error;
mod physics;

pub use error::{CommandError, GeometryError, ValueError, WorldError};
pub use physics::{
    cost_of_step, cost_of_turn, launch_speed, max_points_for_mass, PhysicsConfig, WeaponKind,
};

/// Result of a command that the world accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The command changed the world.
    Applied,
    /// The command was legal but nothing happened, typically because the worm
    /// lacked the action points or room to act. Retrying next turn may succeed.
    NoOp,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Registers a new, empty team.
    AddTeam {
        /// Name of the team; letters only, starting with an uppercase letter.
        name: String,
    },
    /// Places a default worm at a random adjacent position.
    AddWorm {
        /// Team the new worm joins, if any.
        team: Option<TeamId>,
    },
    /// Creates a worm with explicit characteristics.
    SpawnWorm {
        /// Name of the worm.
        name: String,
        /// Centre of the worm's body.
        position: Position,
        /// Initial facing in radians.
        direction: f64,
        /// Radius of the worm's body in meters.
        radius: f64,
        /// Team the new worm joins, if any.
        team: Option<TeamId>,
    },
    /// Places a food item at a random adjacent position.
    AddFood,
    /// Places a food item at the provided position.
    PlaceFood {
        /// Centre of the food item.
        position: Position,
    },
    /// Moves a teamless worm into a team.
    JoinTeam {
        /// Worm joining the team.
        worm: EntityId,
        /// Team being joined.
        team: TeamId,
    },
    /// Gives a worm a new name.
    Rename {
        /// Worm being renamed.
        worm: EntityId,
        /// Replacement name.
        name: String,
    },
    /// Starts the game, selecting the first active worm.
    StartGame,
    /// Turns a worm on the spot.
    Turn {
        /// Worm that turns.
        worm: EntityId,
        /// Angle added to the worm's facing, in radians.
        angle: f64,
    },
    /// Moves a worm a single step along the terrain.
    Step {
        /// Worm that steps.
        worm: EntityId,
    },
    /// Launches a worm along its facing.
    Jump {
        /// Worm that jumps.
        worm: EntityId,
        /// Sampling interval of the flight scan, in seconds.
        time_step: f64,
    },
    /// Lets a worm drop until it rests on terrain.
    Fall {
        /// Worm that falls.
        worm: EntityId,
    },
    /// Cycles a worm's active weapon.
    SelectNextWeapon {
        /// Worm that switches weapons.
        worm: EntityId,
    },
    /// Fires the worm's active weapon, creating the live projectile.
    Shoot {
        /// Worm that fires.
        worm: EntityId,
        /// Percentage of the weapon's force range to apply.
        propulsion_yield: u8,
    },
    /// Flies the live projectile until it strikes a worm or the terrain.
    ResolveProjectile {
        /// Sampling interval of the flight scan, in seconds.
        time_step: f64,
    },
    /// Hands the turn to the next worm.
    EndTurn,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a team was registered.
    TeamAdded {
        /// Identifier allocated to the team.
        team: TeamId,
        /// Name of the team.
        name: String,
    },
    /// Confirms that a worm entered the world.
    WormSpawned {
        /// Identifier allocated to the worm.
        worm: EntityId,
        /// Centre of the worm's body.
        position: Position,
        /// Radius of the worm's body.
        radius: f64,
    },
    /// Confirms that a worm joined a team.
    WormJoinedTeam {
        /// Worm that joined.
        worm: EntityId,
        /// Team that was joined.
        team: TeamId,
    },
    /// Confirms that a worm was renamed.
    WormRenamed {
        /// Worm that was renamed.
        worm: EntityId,
        /// Name the worm carries now.
        name: String,
    },
    /// Confirms that a food item entered the world.
    FoodPlaced {
        /// Identifier allocated to the food item.
        food: EntityId,
        /// Centre of the food item.
        position: Position,
    },
    /// Announces that the game started.
    GameStarted {
        /// Worm whose turn comes first.
        active: EntityId,
    },
    /// Confirms that a worm turned.
    WormTurned {
        /// Worm that turned.
        worm: EntityId,
        /// Facing after the turn, in radians.
        direction: f64,
        /// Action points charged.
        cost: Points,
    },
    /// Confirms that a worm stepped.
    WormStepped {
        /// Worm that stepped.
        worm: EntityId,
        /// Position before the step.
        from: Position,
        /// Position after the step.
        to: Position,
        /// Action points charged.
        cost: Points,
    },
    /// Confirms that a worm jumped.
    WormJumped {
        /// Worm that jumped.
        worm: EntityId,
        /// Launch position.
        from: Position,
        /// Landing position.
        to: Position,
        /// Time spent airborne, in seconds.
        duration: f64,
    },
    /// Confirms that a worm fell.
    WormFell {
        /// Worm that fell.
        worm: EntityId,
        /// Position before the fall.
        from: Position,
        /// Resting position, or the last in-world position for a lethal fall.
        to: Position,
        /// Hit points lost to the fall.
        damage: Points,
    },
    /// Confirms that a worm ate a food item.
    FoodEaten {
        /// Worm that ate.
        worm: EntityId,
        /// Food item that was consumed.
        food: EntityId,
        /// Radius of the worm after growing.
        radius: f64,
    },
    /// Confirms that a worm switched weapons.
    WeaponSelected {
        /// Worm that switched.
        worm: EntityId,
        /// Weapon now active.
        weapon: WeaponKind,
    },
    /// Confirms that a projectile was fired.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: EntityId,
        /// Worm that fired it.
        worm: EntityId,
        /// Weapon that fired it.
        weapon: WeaponKind,
    },
    /// Reports that the live projectile struck a worm.
    ProjectileStruck {
        /// Projectile that struck.
        projectile: EntityId,
        /// Worm that was struck.
        target: EntityId,
        /// Hit points removed from the target.
        damage: Points,
    },
    /// Reports that the live projectile was spent on terrain or left the world.
    ProjectileExpended {
        /// Projectile that was spent.
        projectile: EntityId,
        /// Last position of the projectile.
        position: Position,
    },
    /// Reports that a worm was removed from the world.
    WormDied {
        /// Worm that died.
        worm: EntityId,
    },
    /// Reports that a team lost its last member and was removed.
    TeamDisbanded {
        /// Team that was removed.
        team: TeamId,
    },
    /// Confirms that the turn passed to another worm.
    TurnEnded {
        /// Worm whose turn ended.
        previous: EntityId,
        /// Worm whose turn begins, absent when no worm remains.
        next: Option<EntityId>,
    },
    /// Announces that a single side remains.
    GameFinished {
        /// Worms declared winners.
        winners: Vec<EntityId>,
    },
}

/// Unique identifier assigned to an entity (worm, projectile or food item).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(u32);

impl TeamId {
    /// Creates a new team identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the team identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single terrain cell expressed as column and row indices.
///
/// Row zero is the top of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell, counted from the top.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Point in world space, measured in meters with y pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Bottom-left corner of every world.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    /// Creates a position, rejecting non-finite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, ValueError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValueError::InvalidCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Position displaced by the provided deltas.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position reached by travelling `distance` meters along `angle` radians.
    #[must_use]
    pub fn offset(self, distance: f64, angle: f64) -> Self {
        self.translated(distance * angle.cos(), distance * angle.sin())
    }
}

/// Facing of a body in radians, kept inside the open interval (-2π, 2π).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction(f64);

impl Direction {
    /// Facing straight to the right.
    pub const RIGHT: Direction = Direction(0.0);

    /// Creates a direction, rejecting angles outside (-2π, 2π).
    pub fn new(radians: f64) -> Result<Self, ValueError> {
        if !Self::is_valid(radians) {
            return Err(ValueError::InvalidDirection(radians));
        }
        Ok(Self(radians))
    }

    /// Reports whether the angle is an acceptable direction.
    #[must_use]
    pub fn is_valid(radians: f64) -> bool {
        radians > -TAU && radians < TAU
    }

    /// Angle in radians.
    #[must_use]
    pub const fn radians(&self) -> f64 {
        self.0
    }

    /// Direction after turning by `angle`, renormalised into (-2π, 2π).
    ///
    /// `angle` must itself be a valid direction.
    pub fn turned(self, angle: f64) -> Result<Self, ValueError> {
        if !Self::is_valid(angle) {
            return Err(ValueError::InvalidDirection(angle));
        }
        let mut turned = self.0 + angle;
        if turned >= TAU {
            turned -= TAU;
        } else if turned <= -TAU {
            turned += TAU;
        }
        Self::new(turned)
    }

    /// Reports whether the direction points into the lower half-plane.
    ///
    /// The exact horizontals and verticals are not facing down.
    #[must_use]
    pub fn is_facing_down(&self) -> bool {
        let angle = self.0;
        (angle > PI && angle < TAU) || (angle > -PI && angle < 0.0)
    }

    /// Reports whether the direction has a non-negative horizontal component.
    #[must_use]
    pub fn is_facing_right(&self) -> bool {
        let angle = self.0;
        angle >= 3.0 * PI / 2.0 || (-PI / 2.0..=PI / 2.0).contains(&angle) || angle <= -3.0 * PI / 2.0
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// Non-negative counter used for action points and hit points.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Points(u32);

impl Points {
    /// No points at all.
    pub const ZERO: Points = Points(0);

    /// Creates a counter holding `value` points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Number of points held.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts `other`, stopping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Points) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Adds `other`, stopping at `cap`.
    #[must_use]
    pub fn capped_add(self, other: Points, cap: Points) -> Self {
        Self(self.0.saturating_add(other.0).min(cap.0))
    }
}

/// Validated worm name.
///
/// Names hold at least two characters, start with an uppercase letter and
/// otherwise contain letters, digits, whitespace, and single or double quotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WormName(String);

impl WormName {
    /// Validates and wraps a worm name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValueError> {
        let name = name.into();
        let allowed = |c: char| c.is_alphanumeric() || c.is_whitespace() || c == '\'' || c == '"';
        if starts_uppercase_with_length(&name) && name.chars().all(allowed) {
            Ok(Self(name))
        } else {
            Err(ValueError::InvalidName(name))
        }
    }

    /// Name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated team name: at least two letters, the first one uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    /// Validates and wraps a team name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValueError> {
        let name = name.into();
        if starts_uppercase_with_length(&name) && name.chars().all(char::is_alphabetic) {
            Ok(Self(name))
        } else {
            Err(ValueError::InvalidName(name))
        }
    }

    /// Name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn starts_uppercase_with_length(name: &str) -> bool {
    name.chars().count() >= 2 && name.chars().next().is_some_and(char::is_uppercase)
}

/// Immutable representation of a worm used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct WormSnapshot {
    /// Identifier of the worm.
    pub id: EntityId,
    /// Name of the worm.
    pub name: WormName,
    /// Centre of the worm's body.
    pub position: Position,
    /// Radius of the worm's body.
    pub radius: f64,
    /// Current facing.
    pub direction: Direction,
    /// Mass derived from the radius, in kilograms.
    pub mass: f64,
    /// Remaining action points.
    pub action_points: Points,
    /// Remaining hit points.
    pub hit_points: Points,
    /// Upper bound shared by action and hit points.
    pub max_points: Points,
    /// Team the worm belongs to, if any.
    pub team: Option<TeamId>,
    /// Weapon that fires on the next shot.
    pub weapon: WeaponKind,
}

/// Immutable representation of the live projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: EntityId,
    /// Centre of the projectile.
    pub position: Position,
    /// Radius of the projectile.
    pub radius: f64,
    /// Launch direction.
    pub direction: Direction,
    /// Weapon that fired the projectile.
    pub weapon: WeaponKind,
    /// Propulsion yield the projectile was fired with.
    pub propulsion_yield: u8,
}

/// Immutable representation of a food item used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodSnapshot {
    /// Identifier of the food item.
    pub id: EntityId,
    /// Centre of the food item.
    pub position: Position,
    /// Radius of the food item.
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn physics_config_round_trips_through_bincode() {
        let config = PhysicsConfig {
            gravity: 3.7,
            ..PhysicsConfig::default()
        };
        assert_round_trip(&config);
    }

    #[test]
    fn positions_reject_non_finite_coordinates() {
        assert!(Position::new(1.0, 2.0).is_ok());
        assert!(matches!(
            Position::new(f64::NAN, 0.0),
            Err(ValueError::InvalidCoordinate { .. })
        ));
        assert!(Position::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn offset_follows_the_angle() {
        let origin = Position::new(1.0, 1.0).expect("finite");
        let moved = origin.offset(2.0, PI / 2.0);
        assert!((moved.x() - 1.0).abs() < 1e-12);
        assert!((moved.y() - 3.0).abs() < 1e-12);
        assert!((origin.distance_to(moved) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn directions_live_in_the_open_interval() {
        assert!(Direction::new(TAU).is_err());
        assert!(Direction::new(-TAU).is_err());
        assert!(Direction::new(TAU - 1e-9).is_ok());
        assert!(Direction::new(f64::NAN).is_err());
    }

    #[test]
    fn turning_renormalises_the_direction() {
        let facing = Direction::new(3.0 * PI / 2.0).expect("valid");
        let turned = facing.turned(PI).expect("valid turn");
        assert!((turned.radians() - PI / 2.0).abs() < 1e-12);

        let facing = Direction::new(-3.0 * PI / 2.0).expect("valid");
        let turned = facing.turned(-PI).expect("valid turn");
        assert!((turned.radians() + PI / 2.0).abs() < 1e-12);

        assert!(Direction::RIGHT.turned(TAU).is_err());
    }

    #[test]
    fn facing_down_excludes_the_horizontal() {
        assert!(!Direction::new(0.0).expect("valid").is_facing_down());
        assert!(!Direction::new(PI).expect("valid").is_facing_down());
        assert!(Direction::new(-PI / 2.0).expect("valid").is_facing_down());
        assert!(Direction::new(3.0 * PI / 2.0).expect("valid").is_facing_down());
        assert!(!Direction::new(PI / 4.0).expect("valid").is_facing_down());
    }

    #[test]
    fn facing_right_covers_both_windings() {
        assert!(Direction::new(PI / 3.0).expect("valid").is_facing_right());
        assert!(!Direction::new(PI).expect("valid").is_facing_right());
        assert!(Direction::new(-7.0 * PI / 4.0).expect("valid").is_facing_right());
        assert!(!Direction::new(-PI).expect("valid").is_facing_right());
    }

    #[test]
    fn points_saturate_and_cap() {
        let points = Points::new(5);
        assert_eq!(points.saturating_sub(Points::new(9)), Points::ZERO);
        assert_eq!(points.capped_add(Points::new(10), Points::new(8)), Points::new(8));
        assert!(Points::ZERO.is_zero());
    }

    #[test]
    fn worm_names_follow_the_naming_rules() {
        assert!(WormName::new("James o'Hara 2").is_ok());
        assert!(WormName::new("Shaun \"the worm\"").is_ok());
        assert!(WormName::new("j").is_err());
        assert!(WormName::new("james").is_err());
        assert!(WormName::new("James!").is_err());
        assert!(WormName::new("").is_err());
    }

    #[test]
    fn team_names_hold_letters_only() {
        assert!(TeamName::new("Worms").is_ok());
        assert!(TeamName::new("Team Two").is_err());
        assert!(TeamName::new("Red2").is_err());
        assert!(TeamName::new("R").is_err());
    }
}
