#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the worms artillery engine.
//!
//! The [`World`] owns the terrain, every entity and the turn pointer. Only
//! [`apply`] mutates it; read access goes through the [`query`] module.

mod placement;
mod roster;
mod turns;

use std::fmt;

use rand::RngCore;
use tracing::{debug, info};
use worms_core::{
    cost_of_turn, Command, CommandError, Direction, EntityId, Event, GeometryError, Outcome,
    PhysicsConfig, Points, Position, TeamId, TeamName, ValueError, WeaponKind, WorldError,
    WormName,
};
use worms_system_ballistics::{FlightEnd, Target, Trajectory};
use worms_system_locomotion::{plan_step, StepOutcome, Walker};
use worms_terrain::TerrainMap;

use roster::{max_points, Body, EntityKind, ProjectileState, Roster, WormState};
use turns::TurnContext;

const FALL_STEP_FRACTION: f64 = 0.1;
const FALL_DAMAGE_PER_METER: f64 = 3.0;
const FOOD_GROWTH: f64 = 1.1;

/// Represents the authoritative state of a worms game.
pub struct World {
    terrain: TerrainMap,
    config: PhysicsConfig,
    roster: Roster,
    turns: TurnContext,
    rng: Box<dyn RngCore>,
    spawned_worms: u32,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("terrain", &self.terrain)
            .field("config", &self.config)
            .field("roster", &self.roster)
            .field("turns", &self.turns)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Creates an empty world over `terrain`.
    ///
    /// `rng` drives random placement of worms and food and nothing else.
    pub fn new(
        terrain: TerrainMap,
        config: PhysicsConfig,
        rng: impl RngCore + 'static,
    ) -> Result<Self, ValueError> {
        config.validate()?;
        Ok(Self {
            terrain,
            config,
            roster: Roster::default(),
            turns: TurnContext::default(),
            rng: Box::new(rng),
            spawned_worms: 0,
        })
    }

    fn ensure_not_started(&self) -> Result<(), CommandError> {
        if self.turns.is_started() {
            return Err(CommandError::GameAlreadyStarted);
        }
        Ok(())
    }

    fn ensure_team(&self, team: TeamId) -> Result<(), CommandError> {
        self.roster
            .team(team)
            .map(|_| ())
            .ok_or(CommandError::UnknownTeam(team))
    }

    fn ensure_inside(&self, position: Position) -> Result<(), GeometryError> {
        if self.terrain.contains(position) {
            Ok(())
        } else {
            Err(GeometryError::OutOfBounds {
                x: position.x(),
                y: position.y(),
            })
        }
    }

    fn worm(&self, worm: EntityId) -> Result<(Body, &WormState), CommandError> {
        self.roster
            .worm(worm)
            .map(|(body, state)| (*body, state))
            .ok_or(CommandError::UnknownWorm(worm))
    }

    fn worm_mut(&mut self, worm: EntityId) -> Result<(&mut Body, &mut WormState), CommandError> {
        self.roster
            .worm_mut(worm)
            .ok_or(CommandError::UnknownWorm(worm))
    }

    fn add_team(&mut self, name: String, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        let limit = self.config.max_teams;
        if self.roster.teams().len() >= limit {
            return Err(CommandError::TooManyTeams { limit }.into());
        }
        let name = TeamName::new(name)?;
        let label = name.as_str().to_owned();
        let team = self.roster.add_team(name);
        out.push(Event::TeamAdded { team, name: label });
        Ok(Outcome::Applied)
    }

    fn add_worm(
        &mut self,
        team: Option<TeamId>,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        if let Some(team) = team {
            self.ensure_team(team)?;
        }
        let radius = self.config.min_worm_radius;
        let name = WormName::new(format!("Worm {}", self.spawned_worms.saturating_add(1)))?;
        let position =
            placement::random_adjacent_position(self.rng.as_mut(), self.terrain.view(), radius)
                .ok_or(CommandError::NoAdjacentPosition { radius })?;
        let _ = self.insert_worm(name, position, Direction::RIGHT, radius, team, out);
        Ok(Outcome::Applied)
    }

    fn spawn_worm(
        &mut self,
        name: String,
        position: Position,
        direction: f64,
        radius: f64,
        team: Option<TeamId>,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        let name = WormName::new(name)?;
        let direction = Direction::new(direction)?;
        let minimum = self.config.min_worm_radius;
        if !radius.is_finite() || radius < minimum {
            return Err(ValueError::InvalidRadius { radius, minimum }.into());
        }
        if let Some(team) = team {
            self.ensure_team(team)?;
        }
        self.ensure_inside(position)?;
        let _ = self.insert_worm(name, position, direction, radius, team, out);
        Ok(Outcome::Applied)
    }

    fn insert_worm(
        &mut self,
        name: WormName,
        position: Position,
        direction: Direction,
        radius: f64,
        team: Option<TeamId>,
        out: &mut Vec<Event>,
    ) -> EntityId {
        let full = max_points(&self.config, radius);
        let worm = self.roster.insert(
            Body { position, radius },
            EntityKind::Worm(WormState {
                name,
                direction,
                action_points: full,
                hit_points: full,
                team: None,
                weapon: WeaponKind::Bazooka,
            }),
        );
        self.spawned_worms = self.spawned_worms.saturating_add(1);
        out.push(Event::WormSpawned {
            worm,
            position,
            radius,
        });
        if let Some(team) = team {
            self.roster.enlist(worm, team);
            out.push(Event::WormJoinedTeam { worm, team });
        }
        worm
    }

    fn add_food(&mut self, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        let radius = self.config.food_radius;
        let position =
            placement::random_adjacent_position(self.rng.as_mut(), self.terrain.view(), radius)
                .ok_or(CommandError::NoAdjacentPosition { radius })?;
        self.insert_food(position, out);
        Ok(Outcome::Applied)
    }

    fn place_food(
        &mut self,
        position: Position,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        self.ensure_inside(position)?;
        self.insert_food(position, out);
        Ok(Outcome::Applied)
    }

    fn insert_food(&mut self, position: Position, out: &mut Vec<Event>) {
        let radius = self.config.food_radius;
        let food = self
            .roster
            .insert(Body { position, radius }, EntityKind::Food);
        out.push(Event::FoodPlaced { food, position });
    }

    fn join_team(
        &mut self,
        worm: EntityId,
        team: TeamId,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        let (_, state) = self.worm(worm)?;
        if let Some(current) = state.team {
            return Err(CommandError::AlreadyInTeam {
                worm,
                team: current,
            }
            .into());
        }
        self.ensure_team(team)?;
        self.roster.enlist(worm, team);
        out.push(Event::WormJoinedTeam { worm, team });
        Ok(Outcome::Applied)
    }

    fn rename(
        &mut self,
        worm: EntityId,
        name: String,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        let name = WormName::new(name)?;
        let label = name.as_str().to_owned();
        let (_, state) = self.worm_mut(worm)?;
        state.name = name;
        out.push(Event::WormRenamed { worm, name: label });
        Ok(Outcome::Applied)
    }

    fn start_game(&mut self, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        self.ensure_not_started()?;
        let found = self.roster.worm_count();
        if found < 2 {
            return Err(CommandError::TooFewWorms { found }.into());
        }

        for team in self.roster.discard_empty_teams() {
            out.push(Event::TeamDisbanded { team });
        }
        let active = turns::rotation(&self.roster)
            .first()
            .copied()
            .ok_or(CommandError::TooFewWorms { found })?;

        self.turns.begin(active);
        info!(active = active.get(), worms = found, "game started");
        out.push(Event::GameStarted { active });
        self.announce_if_finished(out);
        Ok(Outcome::Applied)
    }

    fn turn(
        &mut self,
        worm: EntityId,
        angle: f64,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        let (_, state) = self.worm(worm)?;
        let direction = state.direction.turned(angle)?;
        let cost = cost_of_turn(angle);
        if state.action_points < cost {
            return Ok(Outcome::NoOp);
        }

        let (_, state) = self.worm_mut(worm)?;
        state.direction = direction;
        state.action_points = state.action_points.saturating_sub(cost);
        out.push(Event::WormTurned {
            worm,
            direction: direction.radians(),
            cost,
        });
        Ok(Outcome::Applied)
    }

    fn step(&mut self, worm: EntityId, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        let (body, state) = self.worm(worm)?;
        let walker = Walker {
            position: body.position,
            radius: body.radius,
            direction: state.direction,
            action_points: state.action_points,
        };

        match plan_step(&walker, self.terrain.view())? {
            StepOutcome::Blocked | StepOutcome::Exhausted { .. } => Ok(Outcome::NoOp),
            StepOutcome::Advance {
                destination, cost, ..
            } => {
                let (body, state) = self.worm_mut(worm)?;
                let from = body.position;
                body.position = destination;
                state.action_points = state.action_points.saturating_sub(cost);
                out.push(Event::WormStepped {
                    worm,
                    from,
                    to: destination,
                    cost,
                });
                self.eat_food(worm, out);
                Ok(Outcome::Applied)
            }
        }
    }

    fn jump(
        &mut self,
        worm: EntityId,
        time_step: f64,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        let (body, state) = self.worm(worm)?;
        if state.action_points.is_zero() {
            return Ok(Outcome::NoOp);
        }

        let mass = self.config.worm_mass(body.radius);
        let trajectory = Trajectory::for_jump(
            &self.config,
            body.position,
            state.direction,
            state.action_points,
            mass,
        );
        let flight = trajectory.flight(time_step, self.terrain.view(), body.radius, &[])?;
        if flight.duration == 0.0 {
            return Ok(Outcome::NoOp);
        }

        let (body, state) = self.worm_mut(worm)?;
        let from = body.position;
        body.position = flight.landing;
        state.action_points = Points::ZERO;
        out.push(Event::WormJumped {
            worm,
            from,
            to: flight.landing,
            duration: flight.duration,
        });

        self.eat_food(worm, out);
        let _ = self.drop_worm(worm, out);
        Ok(Outcome::Applied)
    }

    fn fall(&mut self, worm: EntityId, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        let _ = self.worm(worm)?;
        Ok(self.drop_worm(worm, out))
    }

    /// Lets the worm sink in steps of a tenth of its radius while nothing
    /// supports it. Sinking below the world is lethal; a survivor eats the
    /// food it comes to rest on.
    fn drop_worm(&mut self, worm: EntityId, out: &mut Vec<Event>) -> Outcome {
        let Some((body, state)) = self.roster.worm(worm) else {
            return Outcome::NoOp;
        };
        let (start, radius, hit_points) = (body.position, body.radius, state.hit_points);
        let view = self.terrain.view();
        if !view.can_fall(radius, start) {
            return Outcome::NoOp;
        }

        let increment = FALL_STEP_FRACTION * radius;
        let mut rest = start;
        let mut lethal = false;
        for count in 1u32.. {
            let next = start.translated(0.0, -(f64::from(count) * increment));
            if next.y() < 0.0 {
                lethal = true;
                break;
            }
            if !view.can_fall(radius, next) {
                break;
            }
            rest = next;
        }

        let drop = start.y() - rest.y();
        if !lethal && drop == 0.0 {
            return Outcome::NoOp;
        }
        let damage = if lethal {
            hit_points
        } else {
            Points::new((FALL_DAMAGE_PER_METER * drop).ceil() as u32)
        };

        if let Some((body, _)) = self.roster.worm_mut(worm) {
            body.position = rest;
        }
        debug!(worm = worm.get(), drop, lethal, "worm fell");
        out.push(Event::WormFell {
            worm,
            from: start,
            to: rest,
            damage,
        });
        if !lethal {
            self.eat_food(worm, out);
        }
        self.damage_worm(worm, damage, out);
        Outcome::Applied
    }

    fn select_next_weapon(
        &mut self,
        worm: EntityId,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        let (_, state) = self.worm_mut(worm)?;
        state.weapon = state.weapon.next();
        let weapon = state.weapon;
        out.push(Event::WeaponSelected { worm, weapon });
        Ok(Outcome::Applied)
    }

    fn shoot(
        &mut self,
        worm: EntityId,
        propulsion_yield: u8,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        if propulsion_yield > 100 {
            return Err(ValueError::InvalidYield(propulsion_yield).into());
        }
        let (body, state) = self.worm(worm)?;
        if self.roster.projectile().is_some() {
            return Err(CommandError::ProjectileInFlight.into());
        }
        let weapon = state.weapon;
        let cost = weapon.action_point_cost();
        if state.action_points < cost {
            return Err(CommandError::NotEnoughActionPoints {
                required: cost.get(),
                available: state.action_points.get(),
            }
            .into());
        }
        if !self
            .terrain
            .view()
            .is_passable_for_circle(body.radius, body.radius, body.position)
        {
            return Err(CommandError::ObstructedLaunch(worm).into());
        }

        let direction = state.direction;
        let radius = self.config.projectile_radius(weapon.projectile_mass());
        let origin = body
            .position
            .offset(body.radius + radius, direction.radians());

        let (_, state) = self.worm_mut(worm)?;
        state.action_points = state.action_points.saturating_sub(cost);
        let projectile = self.roster.insert(
            Body {
                position: origin,
                radius,
            },
            EntityKind::Projectile(ProjectileState {
                direction,
                weapon,
                propulsion_yield,
            }),
        );
        out.push(Event::ProjectileFired {
            projectile,
            worm,
            weapon,
        });
        Ok(Outcome::Applied)
    }

    fn resolve_projectile(
        &mut self,
        time_step: f64,
        out: &mut Vec<Event>,
    ) -> Result<Outcome, WorldError> {
        let (projectile, body, state) = self
            .roster
            .projectile()
            .map(|(id, body, state)| (id, *body, *state))
            .ok_or(CommandError::NoProjectileInFlight)?;

        let trajectory = Trajectory::for_projectile(
            &self.config,
            body.position,
            state.direction,
            state.weapon,
            state.propulsion_yield,
        );
        let targets: Vec<Target> = self
            .roster
            .worms()
            .map(|(id, body, _)| Target {
                id,
                position: body.position,
                radius: body.radius,
            })
            .collect();
        let flight = trajectory.flight(time_step, self.terrain.view(), body.radius, &targets)?;

        let _ = self.roster.remove(projectile);
        match flight.end {
            FlightEnd::Struck(target) => {
                let damage = state.weapon.damage();
                debug!(target = target.get(), damage = damage.get(), "projectile struck");
                out.push(Event::ProjectileStruck {
                    projectile,
                    target,
                    damage,
                });
                self.damage_worm(target, damage, out);
            }
            FlightEnd::Grounded | FlightEnd::Terrain | FlightEnd::LeftWorld => {
                out.push(Event::ProjectileExpended {
                    projectile,
                    position: flight.landing,
                });
            }
        }
        Ok(Outcome::Applied)
    }

    fn end_turn(&mut self, out: &mut Vec<Event>) -> Result<Outcome, WorldError> {
        if !self.turns.is_started() {
            return Err(CommandError::GameNotStarted.into());
        }
        if self.roster.projectile().is_some() {
            return Err(CommandError::ProjectileInFlight.into());
        }
        let previous = self.turns.active().ok_or(CommandError::TooFewWorms {
            found: self.roster.worm_count(),
        })?;
        if !turns::is_turn_over(&self.turns, &self.roster) {
            return Err(CommandError::TurnNotOver.into());
        }

        let previous_dead = self
            .roster
            .worm(previous)
            .map_or(true, |(_, state)| state.hit_points.is_zero());
        let next = turns::successor(&self.roster, previous)
            .filter(|next| !(previous_dead && *next == previous));

        if let Some(next) = next {
            let regeneration = Points::new(self.config.hit_point_regeneration);
            if let Some((body, state)) = self.roster.worm_mut(next) {
                let full = max_points(&self.config, body.radius);
                state.action_points = full;
                state.hit_points = state.hit_points.capped_add(regeneration, full);
            }
        }
        self.turns.hand_over(next);
        info!(
            previous = previous.get(),
            next = ?next.map(|id| id.get()),
            "turn ended"
        );
        out.push(Event::TurnEnded { previous, next });

        if previous_dead {
            self.remove_worm(previous, out);
        }
        self.announce_if_finished(out);
        Ok(Outcome::Applied)
    }

    fn eat_food(&mut self, worm: EntityId, out: &mut Vec<Event>) {
        let Some((body, _)) = self.roster.worm(worm) else {
            return;
        };
        let (position, reach) = (body.position, body.radius);
        let eaten: Vec<EntityId> = self
            .roster
            .food()
            .filter(|(_, food)| food.position.distance_to(position) <= food.radius + reach)
            .map(|(id, _)| id)
            .collect();

        for food in eaten {
            let _ = self.roster.remove(food);
            let Some((body, state)) = self.roster.worm_mut(worm) else {
                return;
            };
            body.radius *= FOOD_GROWTH;
            let full = max_points(&self.config, body.radius);
            state.action_points = state.action_points.min(full);
            state.hit_points = state.hit_points.min(full);
            let radius = body.radius;
            debug!(worm = worm.get(), food = food.get(), radius, "food eaten");
            out.push(Event::FoodEaten { worm, food, radius });
        }
    }

    /// Removes hit points. A worm left without any dies on the spot, unless
    /// it is the active worm, which instead loses its action points and is
    /// removed when its turn ends.
    fn damage_worm(&mut self, worm: EntityId, damage: Points, out: &mut Vec<Event>) {
        let active = self.turns.active() == Some(worm);
        let Some((_, state)) = self.roster.worm_mut(worm) else {
            return;
        };
        state.hit_points = state.hit_points.saturating_sub(damage);
        if !state.hit_points.is_zero() {
            return;
        }
        if active {
            state.action_points = Points::ZERO;
        } else {
            self.remove_worm(worm, out);
        }
    }

    fn remove_worm(&mut self, worm: EntityId, out: &mut Vec<Event>) {
        let Some(entity) = self.roster.remove(worm) else {
            return;
        };
        info!(worm = worm.get(), "worm died");
        out.push(Event::WormDied { worm });

        if let EntityKind::Worm(WormState {
            team: Some(team), ..
        }) = entity.kind
        {
            if let Some(team) = self.roster.discharge(worm, team) {
                info!(team = team.get(), "team disbanded");
                out.push(Event::TeamDisbanded { team });
            }
        }
        self.announce_if_finished(out);
    }

    fn announce_if_finished(&mut self, out: &mut Vec<Event>) {
        if turns::is_finished(&self.turns, &self.roster) && self.turns.mark_finish_announced() {
            let winners = turns::winners(&self.roster);
            info!(?winners, "game finished");
            out.push(Event::GameFinished { winners });
        }
    }
}

/// Applies the provided command to the world.
///
/// Rejected commands leave the world untouched and push no events.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<Outcome, WorldError> {
    debug!(?command, "applying command");
    let result = match command {
        Command::AddTeam { name } => world.add_team(name, out_events),
        Command::AddWorm { team } => world.add_worm(team, out_events),
        Command::SpawnWorm {
            name,
            position,
            direction,
            radius,
            team,
        } => world.spawn_worm(name, position, direction, radius, team, out_events),
        Command::AddFood => world.add_food(out_events),
        Command::PlaceFood { position } => world.place_food(position, out_events),
        Command::JoinTeam { worm, team } => world.join_team(worm, team, out_events),
        Command::Rename { worm, name } => world.rename(worm, name, out_events),
        Command::StartGame => world.start_game(out_events),
        Command::Turn { worm, angle } => world.turn(worm, angle, out_events),
        Command::Step { worm } => world.step(worm, out_events),
        Command::Jump { worm, time_step } => world.jump(worm, time_step, out_events),
        Command::Fall { worm } => world.fall(worm, out_events),
        Command::SelectNextWeapon { worm } => world.select_next_weapon(worm, out_events),
        Command::Shoot {
            worm,
            propulsion_yield,
        } => world.shoot(worm, propulsion_yield, out_events),
        Command::ResolveProjectile { time_step } => {
            world.resolve_projectile(time_step, out_events)
        }
        Command::EndTurn => world.end_turn(out_events),
    };
    if let Err(error) = &result {
        debug!(%error, "command rejected");
    }
    result
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use worms_core::{
        EntityId, FoodSnapshot, PhysicsConfig, ProjectileSnapshot, TeamId, TeamName, WormSnapshot,
    };
    use worms_terrain::TerrainMap;

    use super::{roster, turns, World};

    /// Provides read-only access to the terrain.
    #[must_use]
    pub fn terrain(world: &World) -> &TerrainMap {
        &world.terrain
    }

    /// Provides read-only access to the physical configuration.
    #[must_use]
    pub fn config(world: &World) -> &PhysicsConfig {
        &world.config
    }

    /// Captures the worm with the provided identifier, if it is alive.
    #[must_use]
    pub fn worm(world: &World, id: EntityId) -> Option<WormSnapshot> {
        world
            .roster
            .worm(id)
            .map(|(body, state)| roster::worm_snapshot(&world.config, id, body, state))
    }

    /// Captures every live worm in registration order.
    #[must_use]
    pub fn worms(world: &World) -> Vec<WormSnapshot> {
        world
            .roster
            .worms()
            .map(|(id, body, state)| roster::worm_snapshot(&world.config, id, body, state))
            .collect()
    }

    /// Captures the projectile waiting to be resolved, if any.
    #[must_use]
    pub fn projectile(world: &World) -> Option<ProjectileSnapshot> {
        world
            .roster
            .projectile()
            .map(|(id, body, state)| roster::projectile_snapshot(id, body, state))
    }

    /// Captures every food item in placement order.
    #[must_use]
    pub fn food(world: &World) -> Vec<FoodSnapshot> {
        world
            .roster
            .food()
            .map(|(id, body)| roster::food_snapshot(id, body))
            .collect()
    }

    /// Captures every team in registration order.
    #[must_use]
    pub fn teams(world: &World) -> Vec<TeamSnapshot> {
        world
            .roster
            .teams()
            .iter()
            .map(|team| TeamSnapshot {
                id: team.id,
                name: team.name.clone(),
                members: team.members.clone(),
            })
            .collect()
    }

    /// Order in which the live worms take turns.
    #[must_use]
    pub fn rotation(world: &World) -> Vec<EntityId> {
        turns::rotation(&world.roster)
    }

    /// Worm whose turn it is.
    #[must_use]
    pub fn active_worm(world: &World) -> Option<EntityId> {
        world.turns.active()
    }

    /// Reports whether the game has started.
    #[must_use]
    pub fn is_started(world: &World) -> bool {
        world.turns.is_started()
    }

    /// Reports whether a single side remains.
    #[must_use]
    pub fn is_finished(world: &World) -> bool {
        turns::is_finished(&world.turns, &world.roster)
    }

    /// Reports whether the active worm may hand over its turn.
    #[must_use]
    pub fn is_turn_over(world: &World) -> bool {
        turns::is_turn_over(&world.turns, &world.roster)
    }

    /// Worms currently ahead: the largest team, or the healthiest worm.
    #[must_use]
    pub fn winners(world: &World) -> Vec<EntityId> {
        turns::winners(&world.roster)
    }

    /// Reports whether nothing supports the worm, if it is alive.
    #[must_use]
    pub fn can_fall(world: &World, id: EntityId) -> Option<bool> {
        world
            .roster
            .worm(id)
            .map(|(body, _)| world.terrain.view().can_fall(body.radius, body.position))
    }

    /// Immutable representation of a team used for queries.
    #[derive(Clone, Debug, PartialEq)]
    pub struct TeamSnapshot {
        /// Identifier of the team.
        pub id: TeamId,
        /// Name of the team.
        pub name: TeamName,
        /// Members in registration order.
        pub members: Vec<EntityId>,
    }
}
