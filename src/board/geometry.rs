//! Board coordinates and the four cardinal directions.
//!
//! The field is a fixed 9x9 grid. `y` grows downward, so Blue's base row is
//! `y = 0` and Red's is `y = 8`. Coordinates are signed so a step off the
//! edge is representable and can be rejected with `in_range`.

use std::fmt;

/// Number of columns on the field.
pub const FIELD_WIDTH: usize = 9;

/// Number of rows on the field.
pub const FIELD_HEIGHT: usize = 9;

/// Total number of cells on the field.
pub const CELL_COUNT: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// A cell coordinate. May lie outside the field after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    /// Creates a position.
    pub const fn new(x: i8, y: i8) -> Self {
        Pos { x, y }
    }

    /// Returns true if the position lies on the field.
    pub const fn in_range(self) -> bool {
        self.x >= 0 && (self.x as usize) < FIELD_WIDTH && self.y >= 0 && (self.y as usize) < FIELD_HEIGHT
    }

    /// Row-major cell index, or None when off the field.
    pub const fn index(self) -> Option<usize> {
        if self.in_range() {
            Some(self.y as usize * FIELD_WIDTH + self.x as usize)
        } else {
            None
        }
    }

    /// Inverse of `index`. Panics in debug builds on an out-of-range index.
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < CELL_COUNT);
        Pos::new((idx % FIELD_WIDTH) as i8, (idx / FIELD_WIDTH) as i8)
    }

    /// The neighbouring position one step in `dir`.
    pub const fn step(self, dir: Direction) -> Self {
        Pos::new(self.x + dir.dx(), self.y + dir.dy())
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: Pos) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// The position mirrored through the field centre.
    pub const fn mirrored(self) -> Self {
        Pos::new(FIELD_WIDTH as i8 - 1 - self.x, FIELD_HEIGHT as i8 - 1 - self.y)
    }

    /// Iterates every cell of the field in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT).map(Pos::from_index)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A cardinal direction, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// All directions in wire order (`Up = 0` .. `Left = 3`).
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// Column delta of one step.
    pub const fn dx(self) -> i8 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// Row delta of one step.
    pub const fn dy(self) -> i8 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Right | Direction::Left => 0,
        }
    }

    /// The direction rotated by 180 degrees.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Wire index in `0..4`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Parses a wire index in `0..4`.
    pub const fn from_index(idx: u8) -> Option<Direction> {
        match idx {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }
}
