//! Sides and per-tank actions.
//!
//! Both map directly to the integer codes used on the wire: sides are
//! `0` (Blue) and `1` (Red); actions run from `-2` (Invalid) to `7`
//! (LeftShoot), with `shoot = move + 4`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Direction;

/// Number of tanks each side controls.
pub const TANKS_PER_SIDE: usize = 2;

/// One of the two competing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    Blue,
    Red,
}

/// Both sides in wire order.
pub const ALL_SIDES: [Side; 2] = [Side::Blue, Side::Red];

impl Side {
    /// Wire index (0 or 1), also used to index per-side arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses a wire index.
    pub const fn from_index(idx: usize) -> Option<Side> {
        match idx {
            0 => Some(Side::Blue),
            1 => Some(Side::Red),
            _ => None,
        }
    }

    /// The other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Lowercase name used in logs and CLI output.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Side::from_index(usize::from(value)).ok_or_else(|| format!("invalid side: {}", value))
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        side as u8
    }
}

/// A single tank's action for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Action {
    /// No action submitted yet.
    Invalid,
    Stay,
    Up,
    Right,
    Down,
    Left,
    UpShoot,
    RightShoot,
    DownShoot,
    LeftShoot,
}

/// Every action a living tank may submit, in wire order.
pub const PLAYABLE_ACTIONS: [Action; 9] = [
    Action::Stay,
    Action::Up,
    Action::Right,
    Action::Down,
    Action::Left,
    Action::UpShoot,
    Action::RightShoot,
    Action::DownShoot,
    Action::LeftShoot,
];

impl Action {
    /// Returns the wire code (`-2..=7`).
    pub const fn code(self) -> i8 {
        match self {
            Action::Invalid => -2,
            Action::Stay => -1,
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::UpShoot => 4,
            Action::RightShoot => 5,
            Action::DownShoot => 6,
            Action::LeftShoot => 7,
        }
    }

    /// Parses a wire code.
    pub const fn from_code(code: i8) -> Option<Action> {
        match code {
            -2 => Some(Action::Invalid),
            -1 => Some(Action::Stay),
            0 => Some(Action::Up),
            1 => Some(Action::Right),
            2 => Some(Action::Down),
            3 => Some(Action::Left),
            4 => Some(Action::UpShoot),
            5 => Some(Action::RightShoot),
            6 => Some(Action::DownShoot),
            7 => Some(Action::LeftShoot),
            _ => None,
        }
    }

    /// The move action in the given direction.
    pub const fn move_to(dir: Direction) -> Action {
        match dir {
            Direction::Up => Action::Up,
            Direction::Right => Action::Right,
            Direction::Down => Action::Down,
            Direction::Left => Action::Left,
        }
    }

    /// The shoot action in the given direction.
    pub const fn shoot_to(dir: Direction) -> Action {
        match dir {
            Direction::Up => Action::UpShoot,
            Direction::Right => Action::RightShoot,
            Direction::Down => Action::DownShoot,
            Direction::Left => Action::LeftShoot,
        }
    }

    /// True for the four move actions.
    pub const fn is_move(self) -> bool {
        matches!(self, Action::Up | Action::Right | Action::Down | Action::Left)
    }

    /// True for the four shoot actions.
    pub const fn is_shoot(self) -> bool {
        matches!(
            self,
            Action::UpShoot | Action::RightShoot | Action::DownShoot | Action::LeftShoot
        )
    }

    /// Direction of a move or shot; None for Stay and Invalid.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Up | Action::UpShoot => Some(Direction::Up),
            Action::Right | Action::RightShoot => Some(Direction::Right),
            Action::Down | Action::DownShoot => Some(Direction::Down),
            Action::Left | Action::LeftShoot => Some(Direction::Left),
            Action::Invalid | Action::Stay => None,
        }
    }
}

impl TryFrom<i8> for Action {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Action::from_code(value).ok_or_else(|| format!("invalid action code: {}", value))
    }
}

impl From<Action> for i8 {
    fn from(action: Action) -> i8 {
        action.code()
    }
}
