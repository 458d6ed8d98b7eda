use fnv::FnvHashSet;
use serde::*;

/// A board coordinate. Rows grow downwards, columns grow to the right.
///
/// Locations are plain values: neighbors may fall off the board, and it is
/// the board's job to report those as out of bounds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Location { row, col }
    }

    #[inline]
    pub fn offset(self, (dr, dc): (i32, i32)) -> Self {
        Location {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction.offset())
    }

    /// The four axis neighbors in north, east, south, west order.
    pub fn neighbors(self) -> [Location; 4] {
        DIRECTIONS.map(|d| self.step(d))
    }
}

impl From<(i32, i32)> for Location {
    fn from((row, col): (i32, i32)) -> Self {
        Location::new(row, col)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// Distinct neighbors of a group of cells, excluding the group itself.
///
/// Order follows the group order and then north, east, south, west so that
/// searches seeded from the result are deterministic.
pub fn neighbors_of(cells: &[Location]) -> Vec<Location> {
    let mut seen: FnvHashSet<Location> = cells.iter().copied().collect();
    let mut result = Vec::new();

    for cell in cells {
        for n in cell.neighbors() {
            if seen.insert(n) {
                result.push(n);
            }
        }
    }

    result
}
