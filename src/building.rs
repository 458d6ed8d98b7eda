use crate::location::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum BuildingType {
    Residence,
    Factory,
}

/// A building outline: cell offsets relative to the anchor location.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Shape {
    cells: Vec<Location>,
}

impl Shape {
    pub fn new<I, L>(cells: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Location>,
    {
        Shape {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn cells(&self) -> &[Location] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Absolute board cells covered when the shape is anchored at `anchor`.
    pub fn footprint_at(&self, anchor: Location) -> Vec<Location> {
        self.cells
            .iter()
            .map(|c| anchor.offset((c.row, c.col)))
            .collect()
    }

    /// Quarter turn clockwise, shifted so the smallest row and column are 0.
    fn rotated(&self) -> Shape {
        Shape {
            cells: self
                .cells
                .iter()
                .map(|c| Location::new(c.col, -c.row))
                .collect(),
        }
        .normalized()
    }

    fn normalized(&self) -> Shape {
        let min_row = self.cells.iter().map(|c| c.row).min().unwrap_or(0);
        let min_col = self.cells.iter().map(|c| c.col).min().unwrap_or(0);
        let mut cells: Vec<Location> = self
            .cells
            .iter()
            .map(|c| Location::new(c.row - min_row, c.col - min_col))
            .collect();
        cells.sort();
        Shape { cells }
    }
}

/// A building request: a type tag and its rotation variants, indexed from 0.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Building {
    building_type: BuildingType,
    rotations: Vec<Shape>,
}

impl Building {
    /// Builds the request from a base outline, deriving every distinct
    /// quarter-turn rotation. Rotation 0 is the normalized base outline.
    pub fn new(building_type: BuildingType, base: Shape) -> Self {
        let mut rotations: Vec<Shape> = Vec::with_capacity(4);
        let mut current = base.normalized();

        for _ in 0..4 {
            let next = current.rotated();
            if !rotations.contains(&current) {
                rotations.push(current);
            }
            current = next;
        }

        Building {
            building_type,
            rotations,
        }
    }

    /// Builds the request from an explicit rotation list supplied by the host.
    pub fn with_rotations(building_type: BuildingType, rotations: Vec<Shape>) -> Self {
        Building {
            building_type,
            rotations,
        }
    }

    pub fn residence<I, L>(cells: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Location>,
    {
        Building::new(BuildingType::Residence, Shape::new(cells))
    }

    pub fn factory<I, L>(cells: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Location>,
    {
        Building::new(BuildingType::Factory, Shape::new(cells))
    }

    /// Rectangular factory of the given height and width.
    pub fn rectangle_factory(rows: i32, cols: i32) -> Self {
        let cells = (0..rows).flat_map(|r| (0..cols).map(move |c| Location::new(r, c)));
        Building::factory(cells)
    }

    pub fn building_type(&self) -> BuildingType {
        self.building_type
    }

    pub fn is_residence(&self) -> bool {
        self.building_type == BuildingType::Residence
    }

    pub fn rotations(&self) -> &[Shape] {
        &self.rotations
    }

    pub fn rotation(&self, index: usize) -> Option<&Shape> {
        self.rotations.get(index)
    }

    /// Footprint size (every rotation covers the same number of cells).
    pub fn size(&self) -> usize {
        self.rotations.first().map(Shape::len).unwrap_or(0)
    }
}
