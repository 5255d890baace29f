//! Terminal-state evaluation.

use serde::{Deserialize, Serialize};

use crate::board::{Battlefield, Side, TANKS_PER_SIDE};

/// Last turn that can still be played; evaluating turn 101 is a draw.
pub const MAX_TURNS: u32 = 100;

/// Result of a game, as seen after the latest resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NotFinished,
    Draw,
    BlueWins,
    RedWins,
}

impl Outcome {
    /// Wire code: -2 not finished, -1 draw, otherwise the winning side.
    pub const fn code(self) -> i8 {
        match self {
            Outcome::NotFinished => -2,
            Outcome::Draw => -1,
            Outcome::BlueWins => 0,
            Outcome::RedWins => 1,
        }
    }

    pub const fn is_finished(self) -> bool {
        !matches!(self, Outcome::NotFinished)
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::BlueWins => Some(Side::Blue),
            Outcome::RedWins => Some(Side::Red),
            Outcome::NotFinished | Outcome::Draw => None,
        }
    }

    const fn win_for(side: Side) -> Outcome {
        match side {
            Side::Blue => Outcome::BlueWins,
            Side::Red => Outcome::RedWins,
        }
    }
}

/// A side has failed once its base is gone or both its tanks are.
pub fn side_failed(state: &Battlefield, side: Side) -> bool {
    state.base(side).destroyed || (0..TANKS_PER_SIDE).all(|slot| !state.tank_alive(side, slot))
}

/// Evaluates the current state.
pub fn outcome(state: &Battlefield) -> Outcome {
    let blue = side_failed(state, Side::Blue);
    let red = side_failed(state, Side::Red);
    match (blue, red) {
        (true, true) => Outcome::Draw,
        (false, false) if state.current_turn() > MAX_TURNS => Outcome::Draw,
        (false, false) => Outcome::NotFinished,
        (true, false) => Outcome::win_for(Side::Red),
        (false, true) => Outcome::win_for(Side::Blue),
    }
}
