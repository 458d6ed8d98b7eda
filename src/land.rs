//! Board model consumed by the engine.
//!
//! `LandView` is the query surface the engine needs from the host. `Land` is
//! a square grid implementing it, used when no host board is available (tests,
//! offline drivers). The engine itself never mutates the board.

use crate::building::*;
use crate::error::EngineError;
use crate::location::*;
use crate::moves::Move;
use bitflags::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum CellType {
    Empty,
    Road,
    Water,
    Park,
    Residence,
    Factory,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellKinds: u8 {
        const EMPTY = 1;
        const ROAD = 2;
        const WATER = 4;
        const PARK = 8;
        const RESIDENCE = 16;
        const FACTORY = 32;

        const AMENITY = Self::WATER.bits() | Self::PARK.bits();
        const OCCUPIED = Self::ROAD.bits()
            | Self::WATER.bits()
            | Self::PARK.bits()
            | Self::RESIDENCE.bits()
            | Self::FACTORY.bits();
    }
}

impl CellType {
    pub fn kind(self) -> CellKinds {
        match self {
            CellType::Empty => CellKinds::EMPTY,
            CellType::Road => CellKinds::ROAD,
            CellType::Water => CellKinds::WATER,
            CellType::Park => CellKinds::PARK,
            CellType::Residence => CellKinds::RESIDENCE,
            CellType::Factory => CellKinds::FACTORY,
        }
    }

    fn from_symbol(symbol: char) -> Option<CellType> {
        match symbol {
            '.' => Some(CellType::Empty),
            '#' => Some(CellType::Road),
            '~' => Some(CellType::Water),
            '*' => Some(CellType::Park),
            'r' => Some(CellType::Residence),
            'f' => Some(CellType::Factory),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Road => '#',
            CellType::Water => '~',
            CellType::Park => '*',
            CellType::Residence => 'r',
            CellType::Factory => 'f',
        }
    }
}

impl From<BuildingType> for CellType {
    fn from(building_type: BuildingType) -> Self {
        match building_type {
            BuildingType::Residence => CellType::Residence,
            BuildingType::Factory => CellType::Factory,
        }
    }
}

/// Read-only board surface queried by the engine.
pub trait LandView {
    /// Side length of the square board.
    fn side(&self) -> i32;

    /// Cell contents, or `None` when the location is off the board.
    fn cell_type(&self, loc: Location) -> Option<CellType>;

    fn in_bounds(&self, loc: Location) -> bool {
        let side = self.side();
        (0..side).contains(&loc.row) && (0..side).contains(&loc.col)
    }

    /// True for on-board cells of any of the given kinds.
    fn matches(&self, loc: Location, kinds: CellKinds) -> bool {
        self.cell_type(loc)
            .map(|t| kinds.contains(t.kind()))
            .unwrap_or(false)
    }

    fn unoccupied(&self, loc: Location) -> bool {
        self.matches(loc, CellKinds::EMPTY)
    }

    fn is_road(&self, loc: Location) -> bool {
        self.matches(loc, CellKinds::ROAD)
    }

    fn is_pond(&self, loc: Location) -> bool {
        self.matches(loc, CellKinds::WATER)
    }

    fn is_field(&self, loc: Location) -> bool {
        self.matches(loc, CellKinds::PARK)
    }

    /// Outer ring of the board. Perimeter cells count as road-accessible.
    fn on_perimeter(&self, loc: Location) -> bool {
        let last = self.side() - 1;
        loc.row <= 0 || loc.col <= 0 || loc.row >= last || loc.col >= last
    }

    /// Every cell of the shape anchored at `anchor` is on the board and empty.
    fn buildable(&self, shape: &Shape, anchor: Location) -> bool {
        shape
            .cells()
            .iter()
            .all(|c| self.unoccupied(anchor.offset((c.row, c.col))))
    }
}

/// A square grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Land {
    side: i32,
    cells: Vec<CellType>,
}

impl Land {
    pub fn new(side: usize) -> Land {
        Land {
            side: side as i32,
            cells: vec![CellType::Empty; side * side],
        }
    }

    /// Parses a board from text rows using `.` empty, `#` road, `~` water,
    /// `*` park, `r` residence and `f` factory. Returns `None` if the rows do
    /// not form a square or contain an unknown symbol.
    pub fn parse(rows: &[&str]) -> Option<Land> {
        let side = rows.len();
        let mut land = Land::new(side);

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != side {
                return None;
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = CellType::from_symbol(symbol)?;
                land.set(Location::new(row as i32, col as i32), cell);
            }
        }

        Some(land)
    }

    #[inline]
    fn index(&self, loc: Location) -> Option<usize> {
        if self.in_bounds(loc) {
            Some(loc.row as usize * self.side as usize + loc.col as usize)
        } else {
            None
        }
    }

    /// Overwrites a cell. Off-board locations are ignored.
    pub fn set(&mut self, loc: Location, cell: CellType) {
        if let Some(index) = self.index(loc) {
            self.cells[index] = cell;
        }
    }

    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Applies an accepted move, the way the host framework would. Every
    /// cell the move builds on must be on the board and empty; on error the
    /// board is left untouched. Rejected moves are a no-op.
    pub fn apply(&mut self, mv: &Move) -> Result<(), EngineError> {
        if !mv.accept {
            return Ok(());
        }

        let shape = mv
            .request
            .rotation(mv.rotation)
            .ok_or(EngineError::InvalidRotation {
                rotation: mv.rotation,
                available: mv.request.rotations().len(),
            })?;
        let footprint = shape.footprint_at(mv.location);
        let building_cell = CellType::from(mv.request.building_type());

        let writes: Vec<(Location, CellType)> = footprint
            .iter()
            .map(|loc| (*loc, building_cell))
            .chain(mv.road.iter().map(|loc| (*loc, CellType::Road)))
            .chain(mv.park.iter().map(|loc| (*loc, CellType::Park)))
            .chain(mv.water.iter().map(|loc| (*loc, CellType::Water)))
            .collect();

        for (loc, _) in &writes {
            match self.cell_type(*loc) {
                None => return Err(EngineError::OutOfBounds { location: *loc }),
                Some(CellType::Empty) => {}
                Some(_) => return Err(EngineError::Occupied { location: *loc }),
            }
        }

        // Overlap inside the move itself shows up as a second write to a
        // cell the first write already filled.
        let mut written = fnv::FnvHashSet::default();
        for (loc, _) in &writes {
            if !written.insert(*loc) {
                return Err(EngineError::Occupied { location: *loc });
            }
        }

        for (loc, cell) in writes {
            self.set(loc, cell);
        }

        Ok(())
    }

    /// Text rendering using the same symbols as `parse`.
    pub fn render(&self) -> String {
        let side = self.side as usize;
        let mut out = String::with_capacity(side * (side + 1));
        for (i, cell) in self.cells.iter().enumerate() {
            out.push(cell.symbol());
            if i % side == side - 1 {
                out.push('\n');
            }
        }
        out
    }
}

impl LandView for Land {
    fn side(&self) -> i32 {
        self.side
    }

    fn cell_type(&self, loc: Location) -> Option<CellType> {
        self.index(loc).map(|i| self.cells[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;

    #[test]
    fn parse_and_render_agree() {
        let rows = ["#..", ".~*", "rf."];
        let land = Land::parse(&rows).unwrap();

        assert_eq!(land.side(), 3);
        assert!(land.is_road(Location::new(0, 0)));
        assert!(land.is_pond(Location::new(1, 1)));
        assert!(land.is_field(Location::new(1, 2)));
        assert_eq!(land.render(), "#..\n.~*\nrf.\n");
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert!(Land::parse(&["...", ".."]).is_none());
        assert!(Land::parse(&["..", ".x"]).is_none());
    }

    #[test]
    fn off_board_cells_are_not_unoccupied() {
        let land = Land::new(4);

        assert!(!land.unoccupied(Location::new(-1, 0)));
        assert!(!land.unoccupied(Location::new(0, 4)));
        assert!(land.unoccupied(Location::new(3, 3)));
    }

    #[test]
    fn perimeter_is_outer_ring() {
        let land = Land::new(5);

        assert!(land.on_perimeter(Location::new(0, 2)));
        assert!(land.on_perimeter(Location::new(2, 4)));
        assert!(!land.on_perimeter(Location::new(1, 1)));
        assert!(!land.on_perimeter(Location::new(3, 3)));
    }

    #[test]
    fn buildable_requires_empty_cells() {
        let land = Land::parse(&["....", ".#..", "....", "...."]).unwrap();
        let shape = Shape::new([(0, 0), (0, 1)]);

        assert!(land.buildable(&shape, Location::new(0, 0)));
        assert!(!land.buildable(&shape, Location::new(1, 0)));
        assert!(!land.buildable(&shape, Location::new(0, 3)));
    }

    #[test]
    fn apply_writes_all_construction() {
        let mut land = Land::new(5);
        let request = Building::residence([(0, 0), (0, 1)]);
        let mv = Move {
            accept: true,
            request,
            location: Location::new(1, 1),
            rotation: 0,
            road: [Location::new(0, 1)].into_iter().collect(),
            water: [Location::new(2, 1)].into_iter().collect(),
            park: [Location::new(2, 2)].into_iter().collect(),
        };

        land.apply(&mv).unwrap();

        assert_eq!(land.count(CellType::Residence), 2);
        assert!(land.is_road(Location::new(0, 1)));
        assert!(land.is_pond(Location::new(2, 1)));
        assert!(land.is_field(Location::new(2, 2)));
    }

    #[test]
    fn apply_rejects_occupied_cells_without_mutating() {
        let mut land = Land::parse(&["....", "..#.", "....", "...."]).unwrap();
        let before = land.clone();
        let mv = Move {
            accept: true,
            request: Building::residence([(0, 0), (0, 1)]),
            location: Location::new(1, 1),
            rotation: 0,
            road: FnvHashSet::default(),
            water: FnvHashSet::default(),
            park: FnvHashSet::default(),
        };

        assert_eq!(
            land.apply(&mv),
            Err(EngineError::Occupied {
                location: Location::new(1, 2)
            })
        );
        assert_eq!(land, before);
    }

    #[test]
    fn rejected_move_is_a_no_op() {
        let mut land = Land::new(3);
        let mv = Move::rejected(Building::rectangle_factory(1, 1));

        land.apply(&mv).unwrap();

        assert_eq!(land.count(CellType::Empty), 9);
    }
}
