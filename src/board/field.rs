//! The cell grid and the entity arena it indexes into.
//!
//! Entities are owned by the arena; cells only hold `EntityId`s in insertion
//! order. An entity is listed in a cell if and only if it is alive and its
//! stored position is that cell.

use super::entity::{Entity, EntityId, Occupant};
use super::geometry::{Pos, CELL_COUNT};

/// Grid of cells plus the arena of every entity ever spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: Vec<Vec<EntityId>>,
    entities: Vec<Entity>,
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Creates an empty field.
    pub fn new() -> Self {
        Field {
            cells: vec![Vec::new(); CELL_COUNT],
            entities: Vec::new(),
        }
    }

    /// Adds a new entity to the arena and places it at `pos`.
    ///
    /// Returns None if `pos` is off the field.
    pub fn spawn(&mut self, occupant: Occupant, pos: Pos) -> Option<EntityId> {
        let idx = pos.index()?;
        let id = EntityId(self.entities.len() as u16);
        self.entities.push(Entity {
            occupant,
            pos,
            destroyed: false,
        });
        self.cells[idx].push(id);
        Some(id)
    }

    /// Places a detached entity at `pos` and marks it alive. Only used to
    /// move live entities; destroyed ones are never put back.
    ///
    /// Refuses (returns false) if the entity is already on the field or
    /// `pos` is off the field.
    pub(crate) fn insert(&mut self, id: EntityId, pos: Pos) -> bool {
        let Some(idx) = pos.index() else {
            return false;
        };
        let entity = &mut self.entities[id.index()];
        if !entity.destroyed {
            return false;
        }
        entity.pos = pos;
        entity.destroyed = false;
        self.cells[idx].push(id);
        true
    }

    /// Detaches an entity from its cell and marks it destroyed.
    ///
    /// Returns false if it was already detached.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let entity = &mut self.entities[id.index()];
        if entity.destroyed {
            return false;
        }
        entity.destroyed = true;
        if let Some(idx) = entity.pos.index() {
            self.cells[idx].retain(|&other| other != id);
        }
        true
    }

    /// Moves a live entity to `pos`, keeping it alive.
    ///
    /// Refuses a destroyed entity or an off-field `pos`, leaving it untouched.
    pub(crate) fn relocate(&mut self, id: EntityId, pos: Pos) -> bool {
        pos.in_range() && self.remove(id) && self.insert(id, pos)
    }

    /// Entities in the cell at `pos`, in insertion order. Empty when off the field.
    pub fn occupants_at(&self, pos: Pos) -> &[EntityId] {
        match pos.index() {
            Some(idx) => &self.cells[idx],
            None => &[],
        }
    }

    /// True if `pos` is on the field and holds nothing.
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        pos.in_range() && self.occupants_at(pos).is_empty()
    }

    /// The first occupant listed at `pos`, if any.
    pub fn top_at(&self, pos: Pos) -> Option<&Entity> {
        self.occupants_at(pos).first().map(|&id| self.entity(id))
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    /// Every entity in spawn order, with its id.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u16), e))
    }
}
