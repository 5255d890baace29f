//! Per-tank action legality.
//!
//! Legality is decided against the current board and the tank's previous
//! action only; whether a shot actually hits anything is settled when the
//! turn is resolved.

use crate::board::{Action, Battlefield, Pos, Side, ALL_SIDES, TANKS_PER_SIDE};

/// Why a submitted action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("{side} tank {slot} fired last turn and cannot fire again")]
    ConsecutiveShot { side: Side, slot: usize },

    #[error("{side} tank {slot} cannot move off the field to {target}")]
    OutOfRange { side: Side, slot: usize, target: Pos },

    #[error("{side} tank {slot} cannot move onto occupied cell {target}")]
    Blocked { side: Side, slot: usize, target: Pos },

    #[error("{side} tank {slot} has no action submitted")]
    Unset { side: Side, slot: usize },

    #[error("{side} has no tank in slot {slot}")]
    NoSuchTank { side: Side, slot: usize },
}

/// Checks one tank's proposed action. Destroyed tanks accept anything.
pub fn check_action(state: &Battlefield, side: Side, slot: usize, action: Action) -> Result<(), IllegalAction> {
    if slot >= TANKS_PER_SIDE {
        return Err(IllegalAction::NoSuchTank { side, slot });
    }
    let tank = state.tank(side, slot);
    if tank.destroyed {
        return Ok(());
    }
    if action.is_shoot() && state.last_action(side, slot).is_shoot() {
        return Err(IllegalAction::ConsecutiveShot { side, slot });
    }
    match action {
        Action::Invalid => Err(IllegalAction::Unset { side, slot }),
        Action::Stay => Ok(()),
        a if a.is_shoot() => Ok(()),
        a => {
            let Some(dir) = a.direction() else {
                return Err(IllegalAction::Unset { side, slot });
            };
            let target = tank.pos.step(dir);
            if !target.in_range() {
                Err(IllegalAction::OutOfRange { side, slot, target })
            } else if !state.field().occupants_at(target).is_empty() {
                Err(IllegalAction::Blocked { side, slot, target })
            } else {
                Ok(())
            }
        }
    }
}

/// True if the action passes `check_action`.
pub fn is_legal(state: &Battlefield, side: Side, slot: usize, action: Action) -> bool {
    check_action(state, side, slot, action).is_ok()
}

/// Checks every tank's pending action, reporting the first failure.
pub fn check_all(state: &Battlefield) -> Result<(), IllegalAction> {
    for side in ALL_SIDES {
        for slot in 0..TANKS_PER_SIDE {
            check_action(state, side, slot, state.pending_action(side, slot))?;
        }
    }
    Ok(())
}

/// True if all four pending actions are legal.
pub fn all_legal(state: &Battlefield) -> bool {
    check_all(state).is_ok()
}
