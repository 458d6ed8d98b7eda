use crate::building::*;
use crate::location::*;
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// A placement decision: the building, where and how it goes, and the road,
/// pond and park cells built alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub accept: bool,
    pub request: Building,
    pub location: Location,
    pub rotation: usize,
    pub road: FnvHashSet<Location>,
    pub water: FnvHashSet<Location>,
    pub park: FnvHashSet<Location>,
}

impl Move {
    /// An accepted move with no auxiliary construction yet.
    pub fn new(request: Building, location: Location, rotation: usize) -> Move {
        Move {
            accept: true,
            request,
            location,
            rotation,
            road: FnvHashSet::default(),
            water: FnvHashSet::default(),
            park: FnvHashSet::default(),
        }
    }

    /// A move the host must not apply.
    pub fn rejected(request: Building) -> Move {
        Move {
            accept: false,
            ..Move::new(request, Location::new(0, 0), 0)
        }
    }

    pub fn building_type(&self) -> BuildingType {
        self.request.building_type()
    }

    /// Absolute cells of the building. Empty if the rotation index is invalid.
    pub fn footprint(&self) -> Vec<Location> {
        self.request
            .rotation(self.rotation)
            .map(|shape| shape.footprint_at(self.location))
            .unwrap_or_default()
    }

    /// Every cell this move consumes: footprint, road, park and pond.
    pub fn consumed(&self) -> FnvHashSet<Location> {
        self.footprint()
            .into_iter()
            .chain(self.road.iter().copied())
            .chain(self.park.iter().copied())
            .chain(self.water.iter().copied())
            .collect()
    }
}

/// A candidate move together with its heuristic score.
#[derive(Clone, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i64,
}
