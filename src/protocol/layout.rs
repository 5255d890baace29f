//! Starting layouts.
//!
//! Builds a `Battlefield` from a brick bitfield or a dense cell matrix, reads
//! the bricks back out of a live state, and generates random point-symmetric
//! maps for self-play.

use rand::Rng;

use super::bitfield::{BrickMap, LayoutError};
use crate::board::{
    base_position, default_tank_position, Battlefield, Occupant, Pos, Side, ALL_SIDES, FIELD_HEIGHT,
    FIELD_WIDTH, STEEL_POSITIONS, TANKS_PER_SIDE,
};

/// Dense layout: one code per cell, indexed `[y][x]`.
pub type CellMatrix = [[i8; FIELD_WIDTH]; FIELD_HEIGHT];

/// Matrix code for an empty cell.
pub const CODE_EMPTY: i8 = 0;

/// Matrix code for a brick.
pub const CODE_BRICK: i8 = 1;

/// Maps a negative matrix code (-1..=-4) to the tank it places.
pub fn tank_for_code(code: i8) -> Option<(Side, usize)> {
    if !(-4..=-1).contains(&code) {
        return None;
    }
    let n = (-code - 1) as usize;
    Side::from_index(n / 2).map(|side| (side, n % 2))
}

/// Matrix code for a tank.
pub fn code_for_tank(side: Side, slot: usize) -> i8 {
    -((side.index() * TANKS_PER_SIDE + slot) as i8) - 1
}

/// Default layout plus the given bricks.
///
/// A brick on a tank, base or steel cell is rejected.
pub fn battlefield_from_bricks(bricks: &BrickMap) -> Result<Battlefield, LayoutError> {
    let mut state = Battlefield::new();
    place_bricks(&mut state, bricks.iter())?;
    Ok(state)
}

/// Builds a state from a dense matrix.
///
/// `0` is empty, `1` a brick, `-1..=-4` a tank; other codes are reserved and
/// ignored (dumps use `2` and `3` for the fixed steel and bases). Tanks the
/// matrix does not mention stay on their default cells.
pub fn battlefield_from_matrix(matrix: &CellMatrix) -> Result<Battlefield, LayoutError> {
    let mut state = Battlefield::new();
    let mut placed = [[false; TANKS_PER_SIDE]; 2];
    let mut bricks = Vec::new();

    for (y, row) in matrix.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            let pos = Pos::new(x as i8, y as i8);
            if code == CODE_BRICK {
                bricks.push(pos);
            } else if let Some((side, slot)) = tank_for_code(code) {
                if placed[side.index()][slot] {
                    return Err(LayoutError::DuplicateTank(code));
                }
                placed[side.index()][slot] = true;
                if state.field().occupants_at(pos).iter().any(|&id| !state.field().entity(id).occupant.is_tank()) {
                    return Err(LayoutError::Occupied(pos));
                }
                let id = state.tank_id(side, slot);
                if state.tank(side, slot).pos != pos {
                    state.field.relocate(id, pos);
                }
            }
        }
    }

    place_bricks(&mut state, bricks.into_iter())?;
    Ok(state)
}

fn place_bricks(state: &mut Battlefield, bricks: impl Iterator<Item = Pos>) -> Result<(), LayoutError> {
    for pos in bricks {
        if !state.field().is_empty_at(pos) {
            return Err(LayoutError::Occupied(pos));
        }
        state.field.spawn(Occupant::Brick, pos);
    }
    Ok(())
}

/// The live bricks of a state.
pub fn encode_bricks(state: &Battlefield) -> BrickMap {
    state
        .field()
        .entities()
        .filter(|(_, e)| e.is_alive() && e.occupant == Occupant::Brick)
        .map(|(_, e)| e.pos)
        .collect()
}

/// The dense matrix of a state: bricks, live tanks, and `2`/`3` for steel and
/// bases, so it reads the same as a board dump.
pub fn encode_matrix(state: &Battlefield) -> CellMatrix {
    let mut matrix = [[CODE_EMPTY; FIELD_WIDTH]; FIELD_HEIGHT];
    for pos in Pos::all() {
        let Some(top) = state.field().top_at(pos) else {
            continue;
        };
        matrix[pos.y as usize][pos.x as usize] = match top.occupant {
            Occupant::Tank { side, slot } => code_for_tank(side, slot),
            other => other.item_code() as i8,
        };
    }
    matrix
}

/// True for the cells a random map must keep free: tank starts, bases, steel.
pub fn is_fixed_cell(pos: Pos) -> bool {
    STEEL_POSITIONS.contains(&pos)
        || ALL_SIDES.iter().any(|&side| {
            base_position(side) == pos
                || (0..TANKS_PER_SIDE).any(|slot| default_tank_position(side, slot) == pos)
        })
}

/// Random brick map symmetric under `(x, y) -> (8 - x, 8 - y)`.
///
/// Each free cell pair is filled with probability `density` (clamped to
/// `0.0..=1.0`).
pub fn random_layout(rng: &mut impl Rng, density: f64) -> BrickMap {
    let density = density.clamp(0.0, 1.0);
    let mut map = BrickMap::empty();
    for pos in Pos::all() {
        let mirror = pos.mirrored();
        // Visit each pair once, from its lower-indexed half.
        if mirror < pos || is_fixed_cell(pos) {
            continue;
        }
        if rng.gen_bool(density) {
            map.insert(pos);
            map.insert(mirror);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const SAMPLE_GRID: CellMatrix = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 1, 0],
        [0, 0, 0, 0, 1, 1, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 0, 0, 0],
        [1, 1, 0, 0, 0, 1, 1, 0, 0],
        [1, 1, 0, 0, 0, 0, 0, 0, 0],
    ];

    #[test]
    fn tank_codes() {
        assert_eq!(tank_for_code(-1), Some((Side::Blue, 0)));
        assert_eq!(tank_for_code(-2), Some((Side::Blue, 1)));
        assert_eq!(tank_for_code(-3), Some((Side::Red, 0)));
        assert_eq!(tank_for_code(-4), Some((Side::Red, 1)));
        assert_eq!(tank_for_code(-5), None);
        assert_eq!(tank_for_code(0), None);
        for side in ALL_SIDES {
            for slot in 0..TANKS_PER_SIDE {
                assert_eq!(tank_for_code(code_for_tank(side, slot)), Some((side, slot)));
            }
        }
    }

    #[test]
    fn bricks_placed_from_map() {
        let map: BrickMap = [Pos::new(0, 1), Pos::new(8, 7)].into_iter().collect();
        let state = battlefield_from_bricks(&map).unwrap();
        assert_eq!(state.item_code_at(Pos::new(0, 1)), 1);
        assert_eq!(state.item_code_at(Pos::new(8, 7)), 1);
        assert_eq!(encode_bricks(&state), map);
    }

    #[test]
    fn brick_on_fixed_cell_rejected() {
        let map: BrickMap = [Pos::new(4, 1)].into_iter().collect();
        assert_eq!(battlefield_from_bricks(&map).unwrap_err(), LayoutError::Occupied(Pos::new(4, 1)));
    }

    #[test]
    fn matrix_bricks_match_grid() {
        let state = battlefield_from_matrix(&SAMPLE_GRID).unwrap();
        for pos in Pos::all() {
            let expected = SAMPLE_GRID[pos.y as usize][pos.x as usize] == CODE_BRICK;
            assert_eq!(encode_bricks(&state).contains(pos), expected, "at {}", pos);
        }
    }

    #[test]
    fn matrix_relocates_tanks() {
        let mut grid = [[0i8; FIELD_WIDTH]; FIELD_HEIGHT];
        grid[5][6] = -3;
        grid[7][5] = -1;
        grid[8][5] = -2;
        grid[4][4] = 2; // reserved, ignored
        let state = battlefield_from_matrix(&grid).unwrap();
        assert_eq!(state.tank(Side::Red, 0).pos, Pos::new(6, 5));
        assert_eq!(state.tank(Side::Blue, 0).pos, Pos::new(5, 7));
        assert_eq!(state.tank(Side::Blue, 1).pos, Pos::new(5, 8));
        // Not mentioned: default cell.
        assert_eq!(state.tank(Side::Red, 1).pos, Pos::new(2, 8));
        assert!(state.field().is_empty_at(Pos::new(2, 0)));
        assert!(state.field().is_empty_at(Pos::new(4, 4)));
    }

    #[test]
    fn matrix_tank_on_steel_rejected() {
        let mut grid = [[0i8; FIELD_WIDTH]; FIELD_HEIGHT];
        grid[1][4] = -1;
        assert_eq!(battlefield_from_matrix(&grid).unwrap_err(), LayoutError::Occupied(Pos::new(4, 1)));
    }

    #[test]
    fn matrix_duplicate_tank_rejected() {
        let mut grid = [[0i8; FIELD_WIDTH]; FIELD_HEIGHT];
        grid[3][3] = -4;
        grid[5][5] = -4;
        assert_eq!(battlefield_from_matrix(&grid).unwrap_err(), LayoutError::DuplicateTank(-4));
    }

    #[test]
    fn encode_matrix_reads_like_dump() {
        let state = battlefield_from_matrix(&SAMPLE_GRID).unwrap();
        let matrix = encode_matrix(&state);
        assert_eq!(matrix[0], [0, 0, -1, 0, 3, 0, -2, 0, 0]);
        assert_eq!(matrix[1][4], 2);
        assert_eq!(matrix[8][2], -4);
        let again = battlefield_from_matrix(&matrix).unwrap();
        assert_eq!(encode_bricks(&again), encode_bricks(&state));
    }

    #[test]
    fn random_layout_is_symmetric_and_avoids_fixed_cells() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let map = random_layout(&mut rng, 0.4);
            for pos in map.iter() {
                assert!(map.contains(pos.mirrored()));
                assert!(!is_fixed_cell(pos));
            }
            assert!(battlefield_from_bricks(&map).is_ok());
        }
        assert!(random_layout(&mut rng, 0.0).is_empty());
    }
}
