//! Amenity locator: attaches a park and a pond to a residence candidate.
//!
//! For each amenity the residence does not already touch, the locator first
//! tries to reach an existing one through a short path of empty cells. If none
//! is within reach it generates a straight segment next to the building and
//! keeps the best scoring one. Parks are planned before ponds, and cells taken
//! by one are unavailable to the other.

use crate::config::*;
use crate::land::*;
use crate::location::*;
use crate::moves::Move;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use std::cmp::Reverse;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Amenity {
    Park,
    Water,
}

impl Amenity {
    pub fn kind(self) -> CellKinds {
        match self {
            Amenity::Park => CellKinds::PARK,
            Amenity::Water => CellKinds::WATER,
        }
    }

    fn planned(self, mv: &Move) -> &FnvHashSet<Location> {
        match self {
            Amenity::Park => &mv.park,
            Amenity::Water => &mv.water,
        }
    }

    fn other(self) -> Amenity {
        match self {
            Amenity::Park => Amenity::Water,
            Amenity::Water => Amenity::Park,
        }
    }
}

/// True if any cell next to the footprint is the amenity, on the board or in
/// `planned`.
pub fn is_adjacent_to(
    footprint: &[Location],
    land: &dyn LandView,
    amenity: Amenity,
    planned: &FnvHashSet<Location>,
) -> bool {
    neighbors_of(footprint)
        .iter()
        .any(|n| land.matches(*n, amenity.kind()) || planned.contains(n))
}

/// Returns a copy of `base` with a park and a pond planned where the building
/// lacks them. An amenity that can be neither reached nor generated is left
/// out.
pub fn build_parks_ponds(base: &Move, land: &dyn LandView, config: &EngineConfig) -> Move {
    let footprint = base.footprint();
    let mut mv = base.clone();
    mv.park.clear();
    mv.water.clear();

    let none = FnvHashSet::default();

    if !is_adjacent_to(&footprint, land, Amenity::Park, &none) {
        mv.park = plan_amenity(&mv, &footprint, land, Amenity::Park, config);
    }

    if !is_adjacent_to(&footprint, land, Amenity::Water, &none) {
        mv.water = plan_amenity(&mv, &footprint, land, Amenity::Water, config);
    }

    mv
}

fn plan_amenity(
    mv: &Move,
    footprint: &[Location],
    land: &dyn LandView,
    amenity: Amenity,
    config: &EngineConfig,
) -> FnvHashSet<Location> {
    let marked: FnvHashSet<Location> = mv
        .road
        .iter()
        .chain(amenity.other().planned(mv).iter())
        .copied()
        .collect();

    if let Some(path) = connect_to(footprint, land, &marked, amenity, config.amenity_search_depth)
    {
        trace!("{:?}: connecting to existing via {} cells", amenity, path.len());
        return path;
    }

    let segments = straight_segments(footprint, land, &marked, config.amenity_segment_length);
    let mut scoring_marked = marked;
    scoring_marked.extend(footprint.iter().copied());

    segments
        .into_iter()
        .map(|segment| {
            let score = score_segment(&segment, land, &mv.road, &scoring_marked, &config.weights);
            (score, segment)
        })
        .min_by_key(|(score, _)| Reverse(*score))
        .map(|(_, segment)| segment.into_iter().collect())
        .unwrap_or_default()
}

/// Bounded breadth-first search from the footprint through empty cells not
/// in `marked`, looking for a cell that touches an existing `amenity`. The
/// search expands at most `max_depth` levels; level 1 is the footprint's own
/// empty neighbors. Returns the connecting path, or `None` if nothing is in
/// reach.
pub fn connect_to(
    footprint: &[Location],
    land: &dyn LandView,
    marked: &FnvHashSet<Location>,
    amenity: Amenity,
    max_depth: usize,
) -> Option<FnvHashSet<Location>> {
    let footprint_cells: FnvHashSet<Location> = footprint.iter().copied().collect();
    let open = |loc: &Location| {
        land.unoccupied(*loc) && !marked.contains(loc) && !footprint_cells.contains(loc)
    };

    let mut predecessors: FnvHashMap<Location, Location> = FnvHashMap::default();
    let mut visited: FnvHashSet<Location> = FnvHashSet::default();
    let mut level: Vec<Location> = neighbors_of(footprint)
        .into_iter()
        .filter(|n| open(n))
        .collect();
    visited.extend(level.iter().copied());

    for _ in 0..max_depth {
        let mut next_level = Vec::new();

        for &cell in &level {
            if cell
                .neighbors()
                .iter()
                .any(|n| land.matches(*n, amenity.kind()))
            {
                return Some(trace_path(cell, &predecessors));
            }

            for n in cell.neighbors() {
                if open(&n) && visited.insert(n) {
                    predecessors.insert(n, cell);
                    next_level.push(n);
                }
            }
        }

        if next_level.is_empty() {
            break;
        }
        level = next_level;
    }

    None
}

fn trace_path(
    end: Location,
    predecessors: &FnvHashMap<Location, Location>,
) -> FnvHashSet<Location> {
    let mut path = FnvHashSet::default();
    let mut current = Some(end);

    while let Some(cell) = current {
        path.insert(cell);
        current = predecessors.get(&cell).copied();
    }

    path
}

/// Every straight run of exactly `length` empty, unmarked cells that starts
/// at an empty neighbor of the footprint and extends north, east, south or
/// west. Runs that leave the board or hit an occupied, marked or footprint
/// cell are dropped.
pub fn straight_segments(
    footprint: &[Location],
    land: &dyn LandView,
    marked: &FnvHashSet<Location>,
    length: usize,
) -> Vec<Vec<Location>> {
    let footprint_cells: FnvHashSet<Location> = footprint.iter().copied().collect();
    let open = |loc: &Location| {
        land.unoccupied(*loc) && !marked.contains(loc) && !footprint_cells.contains(loc)
    };

    let mut segments = Vec::new();

    for start in neighbors_of(footprint).into_iter().filter(|n| open(n)) {
        for direction in DIRECTIONS {
            let segment: Vec<Location> =
                std::iter::successors(Some(start), |c| Some(c.step(direction)))
                    .take(length)
                    .take_while(|c| open(c))
                    .collect();

            if segment.len() == length {
                segments.push(segment);
            }
        }
    }

    segments
}

/// Packing potential of a generated segment: a bonus per distinct open cell
/// around it, a penalty per distinct road cell around it (board road or the
/// move's new road).
pub fn score_segment(
    segment: &[Location],
    land: &dyn LandView,
    road: &FnvHashSet<Location>,
    marked: &FnvHashSet<Location>,
    weights: &ScoringWeights,
) -> i64 {
    let around = neighbors_of(segment);

    let open = around
        .iter()
        .filter(|n| land.unoccupied(**n) && !marked.contains(n))
        .count() as i64;
    let roads = around
        .iter()
        .filter(|n| land.is_road(**n) || road.contains(n))
        .count() as i64;

    open * weights.parkpond_packing_bonus - roads * weights.road_adj_pond_penalty
}
