//! Legal action generation.
//!
//! Enumerates the legal actions of a tank in the current state and picks
//! random legal actions for a whole side. The random picks are the stand-in
//! decision policy used by the bot binary and the self-play harness.

pub mod legality;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Action, Battlefield, Side, PLAYABLE_ACTIONS, TANKS_PER_SIDE};

pub use legality::{all_legal, check_action, check_all, is_legal, IllegalAction};

/// All legal actions for one tank, in wire order. Empty for a destroyed tank
/// or a slot the side does not have.
pub fn legal_actions(state: &Battlefield, side: Side, slot: usize) -> Vec<Action> {
    if slot >= TANKS_PER_SIDE || !state.tank_alive(side, slot) {
        return Vec::new();
    }
    PLAYABLE_ACTIONS
        .iter()
        .copied()
        .filter(|&a| is_legal(state, side, slot, a))
        .collect()
}

/// Picks one uniformly random legal action per tank of `side`.
///
/// Destroyed tanks get `Stay`, which is what the wire expects for them.
pub fn random_actions(state: &Battlefield, side: Side, rng: &mut impl Rng) -> [Action; TANKS_PER_SIDE] {
    let mut actions = [Action::Stay; TANKS_PER_SIDE];
    for (slot, action) in actions.iter_mut().enumerate() {
        let legal = legal_actions(state, side, slot);
        if let Some(&a) = legal.choose(rng) {
            *action = a;
        }
    }
    actions
}
