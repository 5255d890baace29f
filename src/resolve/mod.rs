//! Turn resolution.
//!
//! Applies one turn of simultaneous actions (moves, then shots) and
//! evaluates whether the game has ended.

pub mod outcome;
pub mod turn;

pub use outcome::{outcome, side_failed, Outcome, MAX_TURNS};
pub use turn::{resolve_turn, TurnReport};
