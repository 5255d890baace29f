//! Game state representation.
//!
//! `Battlefield` is the single aggregate a game owns: the field with its
//! entity arena, stable handles to the four tanks and two bases, and the
//! per-turn bookkeeping (pending and last actions, turn counter).

use std::fmt;

use super::action::{Action, Side, TANKS_PER_SIDE};
use super::entity::{Entity, EntityId, Occupant};
use super::field::Field;
use super::geometry::{Pos, FIELD_HEIGHT, FIELD_WIDTH};
use crate::movegen::legality::{check_action, IllegalAction};

/// Positions of the two indestructible steel blocks.
pub const STEEL_POSITIONS: [Pos; 2] = [Pos::new(4, 1), Pos::new(4, 7)];

/// Default position of a side's base.
pub const fn base_position(side: Side) -> Pos {
    Pos::new(4, side.index() as i8 * 8)
}

/// Default starting position of a tank: x = 2 or 6 picked by `side XOR slot`.
pub const fn default_tank_position(side: Side, slot: usize) -> Pos {
    let x = if (side.index() ^ slot) != 0 { 6 } else { 2 };
    Pos::new(x, side.index() as i8 * 8)
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battlefield {
    pub(crate) field: Field,
    pub(crate) tanks: [[EntityId; TANKS_PER_SIDE]; 2],
    pub(crate) bases: [EntityId; 2],
    pub(crate) last_actions: [[Action; TANKS_PER_SIDE]; 2],
    pub(crate) pending: [[Action; TANKS_PER_SIDE]; 2],
    pub(crate) current_turn: u32,
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}

impl Battlefield {
    /// Creates the default layout: four tanks, two bases, two steel blocks, no bricks.
    pub fn new() -> Self {
        let mut field = Field::new();
        let mut spawn = |occupant, pos: Pos| {
            field
                .spawn(occupant, pos)
                .unwrap_or_else(|| unreachable!("fixed position {} is on the field", pos))
        };

        let tanks = [Side::Blue, Side::Red].map(|side| {
            [0, 1].map(|slot| spawn(Occupant::Tank { side, slot }, default_tank_position(side, slot)))
        });
        let bases = [Side::Blue, Side::Red].map(|side| spawn(Occupant::Base { side }, base_position(side)));
        for pos in STEEL_POSITIONS {
            spawn(Occupant::Steel, pos);
        }

        Battlefield {
            field,
            tanks,
            bases,
            last_actions: [[Action::Invalid; TANKS_PER_SIDE]; 2],
            pending: [[Action::Invalid; TANKS_PER_SIDE]; 2],
            current_turn: 1,
        }
    }

    /// The underlying grid and entity arena.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Handle of a tank.
    ///
    /// # Panics
    ///
    /// If `slot >= TANKS_PER_SIDE`.
    pub fn tank_id(&self, side: Side, slot: usize) -> EntityId {
        self.tanks[side.index()][slot]
    }

    /// Panics like `tank_id` on a bad slot.
    pub fn tank(&self, side: Side, slot: usize) -> &Entity {
        self.field.entity(self.tank_id(side, slot))
    }

    pub fn tank_alive(&self, side: Side, slot: usize) -> bool {
        self.tank(side, slot).is_alive()
    }

    pub fn base(&self, side: Side) -> &Entity {
        self.field.entity(self.bases[side.index()])
    }

    /// The action this tank executed in the previous resolved turn.
    pub fn last_action(&self, side: Side, slot: usize) -> Action {
        self.last_actions[side.index()][slot]
    }

    /// The action submitted for this tank in the current turn, if any.
    pub fn pending_action(&self, side: Side, slot: usize) -> Action {
        self.pending[side.index()][slot]
    }

    /// Turn counter, starting at 1.
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Submits both actions of one side for the current turn.
    ///
    /// Both slots are validated first; on any illegal action nothing is stored.
    pub fn set_actions(&mut self, side: Side, actions: [Action; TANKS_PER_SIDE]) -> Result<(), IllegalAction> {
        for (slot, &action) in actions.iter().enumerate() {
            check_action(self, side, slot, action)?;
        }
        self.pending[side.index()] = actions;
        Ok(())
    }

    /// Submits actions for one side, replacing each illegal one with `Stay`.
    ///
    /// Returns the actions actually stored.
    pub fn set_actions_or_stay(&mut self, side: Side, actions: [Action; TANKS_PER_SIDE]) -> [Action; TANKS_PER_SIDE] {
        let mut stored = actions;
        for (slot, action) in stored.iter_mut().enumerate() {
            if let Err(e) = check_action(self, side, slot, *action) {
                log::warn!("{} tank {}: {}; substituting stay", side, slot, e);
                *action = Action::Stay;
            }
        }
        self.pending[side.index()] = stored;
        stored
    }

    /// True if `a` and `b` share a row or column, differ, and every cell
    /// strictly between them is empty.
    pub fn clear_line(&self, a: Pos, b: Pos) -> bool {
        if a == b || (a.x != b.x && a.y != b.y) {
            return false;
        }
        let (dx, dy) = ((b.x - a.x).signum(), (b.y - a.y).signum());
        let mut p = Pos::new(a.x + dx, a.y + dy);
        while p != b {
            if !self.field.occupants_at(p).is_empty() {
                return false;
            }
            p = Pos::new(p.x + dx, p.y + dy);
        }
        true
    }

    /// Item-type code of the first occupant at `pos` (0 when empty).
    pub fn item_code_at(&self, pos: Pos) -> u8 {
        self.field.top_at(pos).map_or(0, |e| e.occupant.item_code())
    }
}

impl fmt::Display for Battlefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.item_code_at(Pos::new(x as i8, y as i8)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
