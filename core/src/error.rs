//! Error taxonomy shared by every crate in the engine.

use thiserror::Error;

use crate::{EntityId, TeamId};

/// Rejections raised while constructing or assigning a value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValueError {
    /// The radius is not finite or lies below the permitted minimum.
    #[error("radius {radius} is not finite or below the minimum of {minimum}")]
    InvalidRadius {
        /// Radius that was supplied.
        radius: f64,
        /// Smallest radius the entity accepts.
        minimum: f64,
    },
    /// The mass is not finite or not strictly positive.
    #[error("mass {0} must be finite and positive")]
    InvalidMass(f64),
    /// The angle lies outside the open interval (-2π, 2π).
    #[error("direction {0} lies outside the open interval (-2π, 2π)")]
    InvalidDirection(f64),
    /// The name does not satisfy the naming rules.
    #[error("name {0:?} is not an acceptable name")]
    InvalidName(String),
    /// At least one coordinate is not finite.
    #[error("coordinate ({x}, {y}) is not finite")]
    InvalidCoordinate {
        /// Horizontal component that was supplied.
        x: f64,
        /// Vertical component that was supplied.
        y: f64,
    },
    /// Propulsion yields are percentages.
    #[error("propulsion yield {0} exceeds 100")]
    InvalidYield(u8),
    /// World dimensions must be finite and strictly positive.
    #[error("world dimensions {width} x {height} must be finite and positive")]
    InvalidDimensions {
        /// Requested world width in meters.
        width: f64,
        /// Requested world height in meters.
        height: f64,
    },
    /// A physics setting is out of range.
    #[error("physics setting {field} = {value} is out of range")]
    InvalidConfig {
        /// Name of the offending setting.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },
    /// The terrain bitmap contains no cells.
    #[error("terrain bitmap contains no cells")]
    EmptyBitmap,
    /// A bitmap row disagrees with the width of the first row.
    #[error("terrain bitmap row {row} has {found} columns, expected {expected}")]
    RaggedBitmap {
        /// Index of the offending row.
        row: usize,
        /// Number of cells found in the row.
        found: usize,
        /// Number of cells in the first row.
        expected: usize,
    },
}

/// Precondition violations raised when a command cannot be honoured.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CommandError {
    /// Roster changes and `StartGame` are only legal before the game starts.
    #[error("the game has already started")]
    GameAlreadyStarted,
    /// Turn commands require a running game.
    #[error("the game has not started")]
    GameNotStarted,
    /// A game needs at least two live worms.
    #[error("at least two worms are required to start, found {found}")]
    TooFewWorms {
        /// Number of live worms at the time of the request.
        found: usize,
    },
    /// The active worm still has action points and hit points.
    #[error("the active worm's turn is not over")]
    TurnNotOver,
    /// A projectile is still waiting to be resolved.
    #[error("a projectile is still in flight")]
    ProjectileInFlight,
    /// No projectile is live, so there is nothing to resolve.
    #[error("no projectile is in flight")]
    NoProjectileInFlight,
    /// The world already holds the maximum number of teams.
    #[error("the world cannot hold more than {limit} teams")]
    TooManyTeams {
        /// Configured team limit.
        limit: usize,
    },
    /// No live worm carries the identifier.
    #[error("worm {0:?} does not exist")]
    UnknownWorm(EntityId),
    /// No team carries the identifier.
    #[error("team {0:?} does not exist")]
    UnknownTeam(TeamId),
    /// A worm belongs to at most one team.
    #[error("worm {worm:?} already belongs to team {team:?}")]
    AlreadyInTeam {
        /// Worm that was asked to join.
        worm: EntityId,
        /// Team the worm already belongs to.
        team: TeamId,
    },
    /// The slope under the worm is too steep relative to its facing.
    #[error("terrain is too steep to step in the current facing")]
    IllegalStep,
    /// The active weapon costs more action points than the worm holds.
    #[error("weapon requires {required} action points, {available} available")]
    NotEnoughActionPoints {
        /// Action points the weapon consumes.
        required: u32,
        /// Action points the worm currently holds.
        available: u32,
    },
    /// The worm is embedded in terrain and cannot fire.
    #[error("worm {0:?} is obstructed by terrain and cannot fire")]
    ObstructedLaunch(EntityId),
    /// The random placement search found no adjacent position.
    #[error("no adjacent position could be found for radius {radius}")]
    NoAdjacentPosition {
        /// Radius of the entity that was being placed.
        radius: f64,
    },
}

/// Geometry requests that are physically impossible.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// The position lies strictly outside the world rectangle.
    #[error("position ({x}, {y}) lies outside the world")]
    OutOfBounds {
        /// Horizontal component of the rejected position.
        x: f64,
        /// Vertical component of the rejected position.
        y: f64,
    },
    /// The grid cell lies beyond the far edges of the bitmap.
    #[error("cell ({column}, {row}) lies outside the terrain bitmap")]
    CellOutOfBounds {
        /// Column index of the rejected cell.
        column: u32,
        /// Row index of the rejected cell.
        row: u32,
    },
    /// Trajectories are only defined for finite, non-negative times.
    #[error("time {0} is negative or not finite")]
    InvalidTime(f64),
    /// Flight scans need a finite, strictly positive sampling step.
    #[error("time step {0} must be finite and positive")]
    InvalidTimeStep(f64),
}

/// Any failure surfaced by the authoritative world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WorldError {
    /// A value failed validation.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// A command's precondition was violated.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// A geometry query was impossible.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
