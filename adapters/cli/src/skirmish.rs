use std::f64::consts::{FRAC_PI_2, PI, TAU};

use anyhow::{Context, Result};
use tracing::{debug, info};
use worms_core::{
    Command, CommandError, EntityId, Event, Outcome, WeaponKind, WorldError, WormSnapshot,
};
use worms_world::{self as world, query, World};

/// Sampling step used for jumps and projectile flights, in seconds.
const TIME_STEP: f64 = 0.005;
/// Extra elevation added to the line of sight when aiming.
const AIM_ELEVATION: f64 = 0.2;
/// Propulsion yield used for every bazooka shot.
const BAZOOKA_YIELD: u8 = 60;

/// Summary of an automated skirmish.
#[derive(Debug)]
pub(crate) struct Report {
    /// Number of turns that were handed over.
    pub(crate) turns: u32,
    /// Whether a single side remained when the skirmish stopped.
    pub(crate) finished: bool,
    /// Worms leading when the skirmish stopped.
    pub(crate) leaders: Vec<WormSnapshot>,
    /// Total number of events the world emitted.
    pub(crate) events: usize,
}

/// Plays turns on behalf of every worm.
///
/// Each worm faces its nearest enemy, fires while it can afford a weapon,
/// then jumps to spend what is left and hands over the turn.
#[derive(Debug)]
pub(crate) struct Skirmish {
    world: World,
    events: Vec<Event>,
}

impl Skirmish {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            events: Vec::new(),
        }
    }

    /// Plays until one side remains, a turn cannot be completed or
    /// `max_turns` turns have been played.
    pub(crate) fn run(mut self, max_turns: u32) -> Result<Report> {
        let mut turns = 0;
        while turns < max_turns && !query::is_finished(&self.world) {
            let Some(active) = query::active_worm(&self.world) else {
                break;
            };
            if !self
                .play_turn(active)
                .with_context(|| format!("worm {} could not play its turn", active.get()))?
            {
                info!(worm = active.get(), "turn cannot be completed, stopping");
                break;
            }
            turns += 1;
        }

        let leaders = query::winners(&self.world)
            .into_iter()
            .filter_map(|id| query::worm(&self.world, id))
            .collect();
        Ok(Report {
            turns,
            finished: query::is_finished(&self.world),
            leaders,
            events: self.events.len(),
        })
    }

    /// Returns `false` when the worm is left with action points it cannot spend.
    fn play_turn(&mut self, worm: EntityId) -> Result<bool, WorldError> {
        let _ = self.apply(Command::Fall { worm })?;
        if let Some(enemy) = self.nearest_enemy(worm) {
            self.face(worm, enemy)?;
            while self.fire(worm)? {
                if query::is_finished(&self.world) {
                    return Ok(true);
                }
            }
        }

        if !query::is_turn_over(&self.world) && !self.spend_on_jump(worm)? {
            return Ok(false);
        }
        let _ = self.apply(Command::EndTurn)?;
        Ok(true)
    }

    fn nearest_enemy(&self, worm: EntityId) -> Option<WormSnapshot> {
        let me = query::worm(&self.world, worm)?;
        query::worms(&self.world)
            .into_iter()
            .filter(|other| other.id != worm && (other.team.is_none() || other.team != me.team))
            .min_by(|a, b| {
                let near = a.position.distance_to(me.position);
                let far = b.position.distance_to(me.position);
                near.total_cmp(&far)
            })
    }

    fn face(&mut self, worm: EntityId, enemy: WormSnapshot) -> Result<(), WorldError> {
        let Some(me) = query::worm(&self.world, worm) else {
            return Ok(());
        };
        let dx = enemy.position.x() - me.position.x();
        let dy = enemy.position.y() - me.position.y();
        let elevation = if dx >= 0.0 {
            AIM_ELEVATION
        } else {
            -AIM_ELEVATION
        };
        let heading = dy.atan2(dx) + elevation;
        let _ = self.turn_towards(worm, heading)?;
        Ok(())
    }

    fn turn_towards(&mut self, worm: EntityId, heading: f64) -> Result<Outcome, WorldError> {
        let Some(me) = query::worm(&self.world, worm) else {
            return Ok(Outcome::NoOp);
        };
        let mut angle = (heading - me.direction.radians()).rem_euclid(TAU);
        if angle > PI {
            angle -= TAU;
        }
        if angle.abs() < f64::EPSILON {
            return Ok(Outcome::NoOp);
        }
        self.apply(Command::Turn { worm, angle })
    }

    /// Fires the best affordable weapon. Returns `false` once nothing can be fired.
    fn fire(&mut self, worm: EntityId) -> Result<bool, WorldError> {
        let Some(me) = query::worm(&self.world, worm) else {
            return Ok(false);
        };
        let preferred = if me.action_points >= WeaponKind::Bazooka.action_point_cost() {
            WeaponKind::Bazooka
        } else {
            WeaponKind::Rifle
        };
        if me.action_points < preferred.action_point_cost() {
            return Ok(false);
        }
        if me.weapon != preferred {
            let _ = self.apply(Command::SelectNextWeapon { worm })?;
        }

        let propulsion_yield = match preferred {
            WeaponKind::Bazooka => BAZOOKA_YIELD,
            WeaponKind::Rifle => 0,
        };
        match self.apply(Command::Shoot {
            worm,
            propulsion_yield,
        }) {
            Ok(_) => {}
            Err(WorldError::Command(
                error @ (CommandError::ObstructedLaunch(_)
                | CommandError::NotEnoughActionPoints { .. }),
            )) => {
                debug!(worm = worm.get(), %error, "holding fire");
                return Ok(false);
            }
            Err(error) => return Err(error),
        }
        let _ = self.apply(Command::ResolveProjectile {
            time_step: TIME_STEP,
        })?;
        Ok(query::worm(&self.world, worm).is_some())
    }

    /// Jumps along the current facing, then straight up if that goes nowhere.
    fn spend_on_jump(&mut self, worm: EntityId) -> Result<bool, WorldError> {
        let jump = Command::Jump {
            worm,
            time_step: TIME_STEP,
        };
        if self.apply(jump.clone())? == Outcome::Applied {
            return Ok(true);
        }
        let _ = self.turn_towards(worm, FRAC_PI_2)?;
        let _ = self.apply(jump)?;
        Ok(query::is_turn_over(&self.world))
    }

    fn apply(&mut self, command: Command) -> Result<Outcome, WorldError> {
        world::apply(&mut self.world, command, &mut self.events)
    }
}
