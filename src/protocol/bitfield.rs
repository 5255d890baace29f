//! Three-integer brick bitfield.
//!
//! The 81 cells are split into three chunks of three rows. Within chunk `i`
//! (rows `3i..3i+3`), cell `(x, y)` is bit `(y - 3i) * 9 + x`: the least
//! significant bit is the first cell of the chunk in row-major order and
//! bit 26 the last. A set bit is a brick. Steel, bases and tanks are fixed
//! or derived elsewhere and never appear in the bitfield.

use std::fmt;

use crate::board::{Pos, CELL_COUNT, FIELD_WIDTH};

/// Number of cells encoded by one integer.
pub const CHUNK_CELLS: usize = 27;

/// Exclusive upper bound for a chunk value.
pub const CHUNK_LIMIT: u32 = 1 << CHUNK_CELLS;

/// Set of brick cells on the 9x9 field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BrickMap {
    bits: u128,
}

/// Errors that can occur while building a layout from wire input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("field chunk {index} value {value} does not fit in 27 bits")]
    FieldOverflow { index: usize, value: u64 },

    #[error("cell {0} is already taken by a fixed occupant")]
    Occupied(Pos),

    #[error("tank code {0} appears more than once")]
    DuplicateTank(i8),
}

impl BrickMap {
    /// The empty map.
    pub const fn empty() -> Self {
        BrickMap { bits: 0 }
    }

    /// Decodes the three wire integers.
    pub fn from_fields(fields: [u64; 3]) -> Result<Self, LayoutError> {
        let mut bits = 0u128;
        for (index, &value) in fields.iter().enumerate() {
            if value >= u64::from(CHUNK_LIMIT) {
                return Err(LayoutError::FieldOverflow { index, value });
            }
            bits |= u128::from(value) << (index * CHUNK_CELLS);
        }
        Ok(BrickMap { bits })
    }

    /// Encodes as three wire integers.
    pub fn to_fields(self) -> [u64; 3] {
        let mask = u128::from(CHUNK_LIMIT - 1);
        [0, 1, 2].map(|index| ((self.bits >> (index * CHUNK_CELLS)) & mask) as u64)
    }

    /// True if `pos` holds a brick. False off the field.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.index().is_some_and(|idx| self.bits & (1u128 << idx) != 0)
    }

    /// Adds a brick. Returns false if `pos` is off the field.
    pub fn insert(&mut self, pos: Pos) -> bool {
        match pos.index() {
            Some(idx) => {
                self.bits |= 1u128 << idx;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, pos: Pos) {
        if let Some(idx) = pos.index() {
            self.bits &= !(1u128 << idx);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Brick cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..CELL_COUNT)
            .filter(move |&idx| self.bits & (1u128 << idx) != 0)
            .map(Pos::from_index)
    }
}

impl FromIterator<Pos> for BrickMap {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        let mut map = BrickMap::empty();
        for pos in iter {
            map.insert(pos);
        }
        map
    }
}

impl fmt::Display for BrickMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..CELL_COUNT {
            let c = if self.bits & (1u128 << idx) != 0 { '1' } else { '0' };
            write!(f, "{}", c)?;
            if idx % FIELD_WIDTH == FIELD_WIDTH - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
