//! Board representation and game-state types.
//!
//! Contains the core data structures for coordinates, actions, field
//! occupants, the cell grid, and the overall game state.

pub mod action;
pub mod entity;
pub mod field;
pub mod geometry;
pub mod state;

pub use action::{Action, Side, ALL_SIDES, PLAYABLE_ACTIONS, TANKS_PER_SIDE};
pub use entity::{Entity, EntityId, Occupant};
pub use field::Field;
pub use geometry::{Direction, Pos, ALL_DIRECTIONS, CELL_COUNT, FIELD_HEIGHT, FIELD_WIDTH};
pub use state::{base_position, default_tank_position, Battlefield, STEEL_POSITIONS};
