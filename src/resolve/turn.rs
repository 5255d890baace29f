//! Simultaneous turn resolution.
//!
//! A turn is applied in three strict phases:
//!
//! 1. every living tank with a move action steps to its destination;
//! 2. every living tank with a shoot action traces a ray from its post-move
//!    cell, and everything in the first occupied cell it reaches joins the
//!    destroy-set, which is removed in one batch (steel excepted);
//! 3. last actions are recorded, pending actions cleared, turn advanced.
//!
//! Two lone tanks firing straight at each other along the same line do not
//! hit one another: the ray that reaches a single tank whose own pending
//! action is a shot in the opposite direction is dropped.

use std::collections::BTreeSet;

use crate::board::{Action, Battlefield, Direction, EntityId, Occupant, Side, ALL_SIDES, TANKS_PER_SIDE};
use crate::movegen::legality::{check_all, IllegalAction};

/// What happened during one resolved turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// The turn number that was resolved.
    pub turn: u32,
    /// The actions executed, indexed by side then slot.
    pub actions: [[Action; TANKS_PER_SIDE]; 2],
    /// Entities removed this turn, in id order.
    pub destroyed: Vec<EntityId>,
}

/// Applies the pending actions of all four tanks.
///
/// Rejected without touching any state if a living tank's pending action is
/// illegal (or missing).
pub fn resolve_turn(state: &mut Battlefield) -> Result<TurnReport, IllegalAction> {
    check_all(state)?;
    let actions = state.pending;

    apply_moves(state, &actions);
    let hits = trace_shots(state, &actions);

    let mut destroyed = Vec::with_capacity(hits.len());
    for id in hits {
        if !state.field.entity(id).occupant.is_destructible() {
            continue;
        }
        if state.field.remove(id) {
            log::debug!(
                "turn {}: destroyed {:?} at {}",
                state.current_turn,
                state.field.entity(id).occupant,
                state.field.entity(id).pos
            );
            destroyed.push(id);
        }
    }

    let turn = state.current_turn;
    state.last_actions = actions;
    state.pending = [[Action::Invalid; TANKS_PER_SIDE]; 2];
    state.current_turn += 1;

    Ok(TurnReport {
        turn,
        actions,
        destroyed,
    })
}

/// Phase 1: moves every living tank whose action is a move.
fn apply_moves(state: &mut Battlefield, actions: &[[Action; TANKS_PER_SIDE]; 2]) {
    for side in ALL_SIDES {
        for slot in 0..TANKS_PER_SIDE {
            let action = actions[side.index()][slot];
            let id = state.tank_id(side, slot);
            let tank = state.field.entity(id);
            if tank.destroyed || !action.is_move() {
                continue;
            }
            if let Some(dir) = action.direction() {
                let target = tank.pos.step(dir);
                state.field.relocate(id, target);
            }
        }
    }
}

/// Phase 2: traces every ray and collects the destroy-set.
fn trace_shots(state: &Battlefield, actions: &[[Action; TANKS_PER_SIDE]; 2]) -> BTreeSet<EntityId> {
    let mut hits = BTreeSet::new();
    for side in ALL_SIDES {
        for slot in 0..TANKS_PER_SIDE {
            let action = actions[side.index()][slot];
            if !action.is_shoot() || !state.tank_alive(side, slot) {
                continue;
            }
            if let Some(dir) = action.direction() {
                hits.extend(trace_ray(state, actions, side, slot, dir));
            }
        }
    }
    hits
}

/// Follows one ray and returns the occupants of the cell it stops in.
fn trace_ray(
    state: &Battlefield,
    actions: &[[Action; TANKS_PER_SIDE]; 2],
    side: Side,
    slot: usize,
    dir: Direction,
) -> Vec<EntityId> {
    let field = state.field();
    let origin = state.tank(side, slot).pos;
    let shooter_alone = field.occupants_at(origin).len() == 1;

    let mut pos = origin.step(dir);
    while pos.in_range() {
        let struck = field.occupants_at(pos);
        if struck.is_empty() {
            pos = pos.step(dir);
            continue;
        }
        if shooter_alone && struck.len() == 1 {
            if let Occupant::Tank { side: t_side, slot: t_slot } = field.entity(struck[0]).occupant {
                let reply = actions[t_side.index()][t_slot];
                if reply.is_shoot() && reply.direction() == Some(dir.opposite()) {
                    return Vec::new();
                }
            }
        }
        return struck.to_vec();
    }
    Vec::new()
}
