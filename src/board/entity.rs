//! Field occupants and the ids that reference them.

use super::action::Side;
use super::geometry::Pos;

/// Stable index of an entity in the field's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u16);

impl EntityId {
    /// Arena slot of this id.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What occupies a cell.
///
/// Only tanks move. Steel absorbs shots but is never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Brick,
    Steel,
    Base { side: Side },
    Tank { side: Side, slot: usize },
}

impl Occupant {
    /// Item-type code used when dumping the board (1 brick .. 4 tank).
    pub const fn item_code(self) -> u8 {
        match self {
            Occupant::Brick => 1,
            Occupant::Steel => 2,
            Occupant::Base { .. } => 3,
            Occupant::Tank { .. } => 4,
        }
    }

    pub const fn is_destructible(self) -> bool {
        !matches!(self, Occupant::Steel)
    }

    pub const fn is_tank(self) -> bool {
        matches!(self, Occupant::Tank { .. })
    }

    /// Owning side for bases and tanks.
    pub const fn side(self) -> Option<Side> {
        match self {
            Occupant::Base { side } | Occupant::Tank { side, .. } => Some(side),
            Occupant::Brick | Occupant::Steel => None,
        }
    }
}

/// An occupant together with its last position and liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub occupant: Occupant,
    pub pos: Pos,
    pub destroyed: bool,
}

impl Entity {
    pub const fn is_alive(&self) -> bool {
        !self.destroyed
    }
}
