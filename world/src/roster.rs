//! Id-indexed arena holding every entity and team of the world.

use std::collections::BTreeMap;

use worms_core::{
    Direction, EntityId, FoodSnapshot, PhysicsConfig, Points, Position, ProjectileSnapshot,
    TeamId, TeamName, WeaponKind, WormName, WormSnapshot,
};

/// Geometry shared by every entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: Position,
    pub(crate) radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WormState {
    pub(crate) name: WormName,
    pub(crate) direction: Direction,
    pub(crate) action_points: Points,
    pub(crate) hit_points: Points,
    pub(crate) team: Option<TeamId>,
    pub(crate) weapon: WeaponKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ProjectileState {
    pub(crate) direction: Direction,
    pub(crate) weapon: WeaponKind,
    pub(crate) propulsion_yield: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EntityKind {
    Worm(WormState),
    Projectile(ProjectileState),
    Food,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entity {
    pub(crate) body: Body,
    pub(crate) kind: EntityKind,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Team {
    pub(crate) id: TeamId,
    pub(crate) name: TeamName,
    pub(crate) members: Vec<EntityId>,
}

/// Entities keyed by identifier. Identifiers are handed out in increasing
/// order, so iteration follows registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Roster {
    entities: BTreeMap<EntityId, Entity>,
    teams: Vec<Team>,
    next_entity: u32,
    next_team: u32,
}

impl Roster {
    pub(crate) fn insert(&mut self, body: Body, kind: EntityKind) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.saturating_add(1);
        let _ = self.entities.insert(id, Entity { body, kind });
        id
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub(crate) fn worm(&self, id: EntityId) -> Option<(&Body, &WormState)> {
        match self.entities.get(&id) {
            Some(Entity {
                body,
                kind: EntityKind::Worm(state),
            }) => Some((body, state)),
            _ => None,
        }
    }

    pub(crate) fn worm_mut(&mut self, id: EntityId) -> Option<(&mut Body, &mut WormState)> {
        match self.entities.get_mut(&id) {
            Some(Entity {
                body,
                kind: EntityKind::Worm(state),
            }) => Some((body, state)),
            _ => None,
        }
    }

    pub(crate) fn worms(&self) -> impl Iterator<Item = (EntityId, &Body, &WormState)> {
        self.entities.iter().filter_map(|(id, entity)| match &entity.kind {
            EntityKind::Worm(state) => Some((*id, &entity.body, state)),
            _ => None,
        })
    }

    pub(crate) fn teamless_worms(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.worms()
            .filter(|(_, _, state)| state.team.is_none())
            .map(|(id, _, _)| id)
    }

    pub(crate) fn worm_count(&self) -> usize {
        self.worms().count()
    }

    pub(crate) fn food(&self) -> impl Iterator<Item = (EntityId, &Body)> {
        self.entities
            .iter()
            .filter(|(_, entity)| matches!(entity.kind, EntityKind::Food))
            .map(|(id, entity)| (*id, &entity.body))
    }

    pub(crate) fn projectile(&self) -> Option<(EntityId, &Body, &ProjectileState)> {
        self.entities
            .iter()
            .find_map(|(id, entity)| match &entity.kind {
                EntityKind::Projectile(state) => Some((*id, &entity.body, state)),
                _ => None,
            })
    }

    pub(crate) fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub(crate) fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    pub(crate) fn add_team(&mut self, name: TeamName) -> TeamId {
        let id = TeamId::new(self.next_team);
        self.next_team = self.next_team.saturating_add(1);
        self.teams.push(Team {
            id,
            name,
            members: Vec::new(),
        });
        id
    }

    pub(crate) fn enlist(&mut self, worm: EntityId, team: TeamId) {
        if let Some(entry) = self.teams.iter_mut().find(|entry| entry.id == team) {
            entry.members.push(worm);
        }
        if let Some((_, state)) = self.worm_mut(worm) {
            state.team = Some(team);
        }
    }

    /// Drops the worm from its team, returning the team when it became empty.
    pub(crate) fn discharge(&mut self, worm: EntityId, team: TeamId) -> Option<TeamId> {
        let entry = self.teams.iter_mut().find(|entry| entry.id == team)?;
        entry.members.retain(|member| *member != worm);
        if entry.members.is_empty() {
            self.teams.retain(|entry| entry.id != team);
            Some(team)
        } else {
            None
        }
    }

    /// Removes every team without members, returning their identifiers.
    pub(crate) fn discard_empty_teams(&mut self) -> Vec<TeamId> {
        let empty: Vec<TeamId> = self
            .teams
            .iter()
            .filter(|team| team.members.is_empty())
            .map(|team| team.id)
            .collect();
        self.teams.retain(|team| !team.members.is_empty());
        empty
    }
}

/// Maximum action and hit points of a worm of the given radius.
pub(crate) fn max_points(config: &PhysicsConfig, radius: f64) -> Points {
    worms_core::max_points_for_mass(config.worm_mass(radius))
}

pub(crate) fn worm_snapshot(
    config: &PhysicsConfig,
    id: EntityId,
    body: &Body,
    state: &WormState,
) -> WormSnapshot {
    WormSnapshot {
        id,
        name: state.name.clone(),
        position: body.position,
        radius: body.radius,
        direction: state.direction,
        mass: config.worm_mass(body.radius),
        action_points: state.action_points,
        hit_points: state.hit_points,
        max_points: max_points(config, body.radius),
        team: state.team,
        weapon: state.weapon,
    }
}

pub(crate) fn projectile_snapshot(
    id: EntityId,
    body: &Body,
    state: &ProjectileState,
) -> ProjectileSnapshot {
    ProjectileSnapshot {
        id,
        position: body.position,
        radius: body.radius,
        direction: state.direction,
        weapon: state.weapon,
        propulsion_yield: state.propulsion_yield,
    }
}

pub(crate) fn food_snapshot(id: EntityId, body: &Body) -> FoodSnapshot {
    FoodSnapshot {
        id,
        position: body.position,
        radius: body.radius,
    }
}
