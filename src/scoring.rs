//! Heuristic score for a fully specified hypothetical move.
//!
//! Scoring never looks at anything but the move, the board and the road
//! registry, so the same inputs always give the same score. Each term is kept
//! in `ScoreBreakdown` for diagnostics; `total` is their sum.

use crate::amenity::*;
use crate::building::BuildingType;
use crate::config::*;
use crate::cutoff::count_cells_cut_off;
use crate::land::*;
use crate::location::*;
use crate::moves::Move;
use crate::road::*;
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// Per-term contributions. Penalties are stored as negative numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: i64,
    pub base: i64,
    pub packing: i64,
    pub amenity: i64,
    pub factory_adjacency: i64,
    pub construction: i64,
    pub perimeter: i64,
    pub road_amenity_conflict: i64,
    pub cutoff: i64,
    /// Number of cells the move would cut off.
    pub cells_cut_off: usize,
}

pub fn score_move(
    mv: &Move,
    land: &dyn LandView,
    registry: &RoadRegistry,
    config: &EngineConfig,
) -> i64 {
    score_breakdown(mv, land, registry, config).total
}

pub fn score_breakdown(
    mv: &Move,
    land: &dyn LandView,
    registry: &RoadRegistry,
    config: &EngineConfig,
) -> ScoreBreakdown {
    let weights = &config.weights;
    let footprint = mv.footprint();
    let building_type = mv.building_type();
    let around_building = neighbors_of(&footprint);

    let mut score = ScoreBreakdown {
        base: footprint.len() as i64 * weights.base_building_score,
        packing: -(packing_factor(mv, &footprint, land) as i64) * weights.packing_factor_multiple,
        ..Default::default()
    };

    match building_type {
        BuildingType::Residence => {
            if is_adjacent_to(&footprint, land, Amenity::Water, &mv.water) {
                score.amenity += weights.pond_bonus_score;
            }
            if is_adjacent_to(&footprint, land, Amenity::Park, &mv.park) {
                score.amenity += weights.field_bonus_score;
            }
            score.amenity -= (mv.water.len() + mv.park.len()) as i64 * weights.build_park_penalty;
        }
        BuildingType::Factory => {
            let count = |kinds: CellKinds| {
                around_building
                    .iter()
                    .filter(|n| land.matches(**n, kinds))
                    .count() as i64
            };
            score.factory_adjacency = -count(CellKinds::WATER) * weights.pond_penalty
                - count(CellKinds::PARK) * weights.pond_penalty
                + count(CellKinds::FACTORY) * weights.factory_bonus;
        }
    }

    let adjacent_roads = around_building
        .iter()
        .filter(|n| mv.road.contains(n) || is_existing_road(**n, land, registry))
        .count() as i64;
    score.construction = -(mv.road.len() as i64) * weights.build_road_penalty
        - adjacent_roads * weights.road_adj_penalty;

    let perimeter_cells = footprint
        .iter()
        .chain(mv.road.iter())
        .chain(mv.park.iter())
        .chain(mv.water.iter())
        .filter(|c| land.on_perimeter(**c))
        .count() as i64;
    score.perimeter = -perimeter_cells * weights.perimeter_penalty;

    let conflicting_roads = mv
        .road
        .iter()
        .filter(|r| {
            r.neighbors().iter().any(|n| {
                land.matches(*n, CellKinds::AMENITY) || mv.water.contains(n) || mv.park.contains(n)
            })
        })
        .count() as i64;
    score.road_amenity_conflict = -conflicting_roads * weights.road_adj_pond_penalty;

    score.cells_cut_off = count_cells_cut_off(mv, land);
    score.cutoff = -cutoff_penalty(score.cells_cut_off, config.cutoff_exponent_cap);

    score.total = score.base
        + score.packing
        + score.amenity
        + score.factory_adjacency
        + score.construction
        + score.perimeter
        + score.road_amenity_conflict
        + score.cutoff;

    score
}

/// `2^min(cells, cap)`.
pub fn cutoff_penalty(cells: usize, cap: u32) -> i64 {
    let exponent = (cells.min(cap as usize) as u32).min(62);
    1i64 << exponent
}

/// Number of open cells around the building. Footprint, park and pond never
/// count. Residences treat road as open; factories count the cells around
/// their new road too, but not the road itself.
fn packing_factor(mv: &Move, footprint: &[Location], land: &dyn LandView) -> usize {
    let mut marked: FnvHashSet<Location> = footprint
        .iter()
        .chain(mv.park.iter())
        .chain(mv.water.iter())
        .copied()
        .collect();

    match mv.building_type() {
        BuildingType::Residence => neighbors_of(footprint)
            .iter()
            .filter(|n| !marked.contains(n) && (land.unoccupied(**n) || land.is_road(**n)))
            .count(),
        BuildingType::Factory => {
            marked.extend(mv.road.iter().copied());
            let mut sources: Vec<Location> = footprint.to_vec();
            let mut road: Vec<Location> = mv.road.iter().copied().collect();
            road.sort();
            sources.extend(road);

            neighbors_of(&sources)
                .iter()
                .filter(|n| !marked.contains(n) && land.unoccupied(**n))
                .count()
        }
    }
}
