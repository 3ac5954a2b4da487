//! Turn bookkeeping: game phase, the active worm and the rotation order.

use worms_core::EntityId;

use crate::roster::Roster;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    NotStarted,
    InProgress,
}

/// Phase of the game and the worm whose turn it is.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TurnContext {
    phase: Phase,
    active: Option<EntityId>,
    finish_announced: bool,
}

impl TurnContext {
    pub(crate) fn is_started(&self) -> bool {
        self.phase == Phase::InProgress
    }

    pub(crate) fn active(&self) -> Option<EntityId> {
        self.active
    }

    pub(crate) fn begin(&mut self, active: EntityId) {
        self.phase = Phase::InProgress;
        self.active = Some(active);
    }

    pub(crate) fn hand_over(&mut self, next: Option<EntityId>) {
        self.active = next;
    }

    /// Returns `true` exactly once, the first time the finish is reported.
    pub(crate) fn mark_finish_announced(&mut self) -> bool {
        !std::mem::replace(&mut self.finish_announced, true)
    }
}

/// Order in which worms take turns: team members in registration order, team
/// after team, then every teamless worm.
pub(crate) fn rotation(roster: &Roster) -> Vec<EntityId> {
    roster
        .teams()
        .iter()
        .flat_map(|team| team.members.iter().copied())
        .chain(roster.teamless_worms())
        .collect()
}

/// Worm following `current` in the rotation, wrapping around.
pub(crate) fn successor(roster: &Roster, current: EntityId) -> Option<EntityId> {
    let order = rotation(roster);
    let index = order.iter().position(|id| *id == current)?;
    order.get((index + 1) % order.len()).copied()
}

/// Reports whether a single side remains in a started game.
pub(crate) fn is_finished(context: &TurnContext, roster: &Roster) -> bool {
    if !context.is_started() {
        return false;
    }
    let teams = roster.teams().len();
    let teamless = roster.teamless_worms().count();
    (teams == 1 && teamless == 0) || (teams == 0 && teamless == 1)
}

/// Reports whether the active worm can no longer act and nothing is in flight.
pub(crate) fn is_turn_over(context: &TurnContext, roster: &Roster) -> bool {
    if roster.projectile().is_some() {
        return false;
    }
    context
        .active()
        .and_then(|id| roster.worm(id))
        .map_or(true, |(_, state)| {
            state.action_points.is_zero() || state.hit_points.is_zero()
        })
}

/// Worms declared winners.
///
/// The largest team wins, the earliest registered one on ties. Without
/// teams, or when no team has more than one member, the healthiest worm in
/// the whole world wins instead.
pub(crate) fn winners(roster: &Roster) -> Vec<EntityId> {
    let largest = roster
        .teams()
        .iter()
        .rev()
        .max_by_key(|team| team.members.len());
    match largest {
        Some(team) if team.members.len() > 1 => team.members.clone(),
        _ => healthiest(roster, roster.worms().map(|(id, _, _)| id)),
    }
}

fn healthiest(roster: &Roster, candidates: impl Iterator<Item = EntityId>) -> Vec<EntityId> {
    candidates
        .filter_map(|id| roster.worm(id).map(|(_, state)| (id, state.hit_points)))
        .fold(None, |best: Option<(EntityId, _)>, (id, hit_points)| match best {
            Some((_, top)) if top >= hit_points => best,
            _ => Some((id, hit_points)),
        })
        .map(|(id, _)| id)
        .into_iter()
        .collect()
}
