//! Candidate generator: sweeps the board for placements of a request.
//!
//! Residences are swept from the top-left corner, row by row, and factories
//! from the bottom-right corner, so the two kinds of development grow apart.
//! The sweep stops after a full row once enough candidates have been found;
//! for residences it also has to have reached the construction frontier.

use crate::amenity::build_parks_ponds;
use crate::building::*;
use crate::config::*;
use crate::land::*;
use crate::location::*;
use crate::moves::*;
use crate::road::*;
use crate::scoring::score_move;
use itertools::iproduct;
use log::*;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SweepOrder {
    /// Rows top to bottom, each row left to right.
    TopDown,
    /// Rows bottom to top, each row right to left.
    BottomUp,
}

impl SweepOrder {
    pub fn for_request(building_type: BuildingType) -> SweepOrder {
        match building_type {
            BuildingType::Residence => SweepOrder::TopDown,
            BuildingType::Factory => SweepOrder::BottomUp,
        }
    }

    fn axis(self, side: i32) -> Vec<i32> {
        match self {
            SweepOrder::TopDown => (0..side).collect(),
            SweepOrder::BottomUp => (0..side).rev().collect(),
        }
    }
}

/// Counters for one sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub rows_scanned: usize,
    pub placements_tried: usize,
    pub unbuildable: usize,
    pub unconnected: usize,
    pub candidates: usize,
}

/// Scored candidates for `request`, in scan order: row, column, rotation, and
/// for residences the base move before its amenity variant.
pub fn generate_candidates(
    request: &Building,
    land: &dyn LandView,
    registry: &RoadRegistry,
    frontier: usize,
    config: &EngineConfig,
) -> (Vec<ScoredMove>, SweepStats) {
    let order = SweepOrder::for_request(request.building_type());
    let side = land.side();
    let rows = order.axis(side);
    let cols = order.axis(side);

    let mut candidates = Vec::new();
    let mut stats = SweepStats::default();

    for row in rows {
        stats.rows_scanned += 1;

        let placements = iproduct!(cols.iter(), request.rotations().iter().enumerate());

        for (&col, (rotation, shape)) in placements {
            stats.placements_tried += 1;
            let location = Location::new(row, col);

            if !land.buildable(shape, location) {
                stats.unbuildable += 1;
                continue;
            }

            match evaluate_placement(request, location, rotation, shape, land, registry, config) {
                Some(mut scored) => candidates.append(&mut scored),
                None => stats.unconnected += 1,
            }
        }

        let enough = candidates.len() >= config.min_potential_moves;
        let stop = match order {
            SweepOrder::TopDown => enough && row as usize >= frontier,
            SweepOrder::BottomUp => enough,
        };
        if stop {
            break;
        }
    }

    stats.candidates = candidates.len();
    debug!("{:?} sweep: {:?}", request.building_type(), stats);

    (candidates, stats)
}

/// Builds and scores the candidates for one buildable placement, or `None`
/// when the placement cannot be connected to the road network.
fn evaluate_placement(
    request: &Building,
    location: Location,
    rotation: usize,
    shape: &Shape,
    land: &dyn LandView,
    registry: &RoadRegistry,
    config: &EngineConfig,
) -> Option<Vec<ScoredMove>> {
    let footprint = shape.footprint_at(location);
    let road = find_shortest_road(&footprint, land, registry)?;

    if !has_road_connection(&footprint, land, registry, &road) {
        return None;
    }

    let mut base = Move::new(request.clone(), location, rotation);
    base.road = road;

    let mut scored = Vec::with_capacity(2);

    if request.is_residence() {
        let with_amenities = build_parks_ponds(&base, land, config);
        let base_score = score_move(&base, land, registry, config);
        let amenity_score = score_move(&with_amenities, land, registry, config);
        scored.push(ScoredMove {
            mv: base,
            score: base_score,
        });
        scored.push(ScoredMove {
            mv: with_amenities,
            score: amenity_score,
        });
    } else {
        let score = score_move(&base, land, registry, config);
        scored.push(ScoredMove { mv: base, score });
    }

    trace!(
        "candidate at ({}, {}) rotation {}: scores {:?}",
        location.row,
        location.col,
        rotation,
        scored.iter().map(|s| s.score).collect::<Vec<_>>()
    );

    Some(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pentomino_residence() -> Building {
        Building::residence([(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)])
    }

    #[test]
    fn residence_sweep_stays_near_the_top() {
        let land = Land::new(20);
        let registry = RoadRegistry::new();
        let config = EngineConfig::default();

        let (candidates, stats) =
            generate_candidates(&pentomino_residence(), &land, &registry, 0, &config);

        assert!(candidates.len() >= config.min_potential_moves);
        assert_eq!(stats.rows_scanned, 1);
        assert!(candidates.iter().all(|c| c.mv.location.row == 0));
        assert_eq!(stats.candidates, candidates.len());
    }

    #[test]
    fn residence_sweep_reaches_the_frontier() {
        let land = Land::new(20);
        let registry = RoadRegistry::new();
        let config = EngineConfig::default();

        let (candidates, stats) =
            generate_candidates(&pentomino_residence(), &land, &registry, 6, &config);

        assert_eq!(stats.rows_scanned, 7);
        assert!(candidates.iter().any(|c| c.mv.location.row == 6));
    }

    #[test]
    fn factory_sweep_starts_bottom_right() {
        let land = Land::new(20);
        let registry = RoadRegistry::new();
        let config = EngineConfig::default();

        let (candidates, _) = generate_candidates(
            &Building::rectangle_factory(2, 3),
            &land,
            &registry,
            0,
            &config,
        );

        let first = &candidates[0].mv;
        assert!(first.location.row >= 17);
        assert!(candidates.iter().all(|c| c.mv.location.row >= 15));
    }

    #[test]
    fn factory_rows_run_right_to_left() {
        let land = Land::new(10);
        let registry = RoadRegistry::new();

        let (candidates, _) = generate_candidates(
            &Building::rectangle_factory(1, 1),
            &land,
            &registry,
            0,
            &EngineConfig::default(),
        );

        let leading: Vec<Location> = candidates.iter().take(5).map(|c| c.mv.location).collect();
        assert_eq!(
            leading,
            vec![
                Location::new(9, 9),
                Location::new(9, 8),
                Location::new(9, 7),
                Location::new(9, 6),
                Location::new(9, 5),
            ]
        );
    }

    #[test]
    fn residences_get_an_amenity_variant() {
        let land = Land::new(12);
        let registry = RoadRegistry::new();
        let config = EngineConfig::default();

        let (candidates, _) =
            generate_candidates(&pentomino_residence(), &land, &registry, 0, &config);

        assert_eq!(candidates.len() % 2, 0);
        for pair in candidates.chunks(2) {
            assert_eq!(pair[0].mv.location, pair[1].mv.location);
            assert_eq!(pair[0].mv.rotation, pair[1].mv.rotation);
            assert!(pair[0].mv.park.is_empty() && pair[0].mv.water.is_empty());
        }
    }

    #[test]
    fn sealed_region_yields_no_candidates() {
        // Every empty cell is enclosed by factories away from the ring.
        let land = Land::parse(&[
            "fffffff",
            "fffffff",
            "ff...ff",
            "ff...ff",
            "ff...ff",
            "fffffff",
            "fffffff",
        ])
        .unwrap();
        let registry = RoadRegistry::new();

        let (candidates, stats) = generate_candidates(
            &Building::rectangle_factory(1, 1),
            &land,
            &registry,
            0,
            &EngineConfig::default(),
        );

        assert!(candidates.is_empty());
        assert_eq!(stats.unconnected, 9);
    }

    #[test]
    fn candidates_never_build_on_occupied_cells() {
        let land = Land::parse(&[
            "..........",
            "..~~......",
            "....rr....",
            "....rr....",
            "..........",
            "...#......",
            "...#......",
            "...#...ff.",
            ".......ff.",
            "..........",
        ])
        .unwrap();
        let registry = RoadRegistry::new();

        let (candidates, _) = generate_candidates(
            &pentomino_residence(),
            &land,
            &registry,
            9,
            &EngineConfig::default(),
        );

        for candidate in &candidates {
            let mv = &candidate.mv;
            let footprint = mv.footprint();
            let all: Vec<Location> = footprint
                .iter()
                .chain(mv.road.iter())
                .chain(mv.park.iter())
                .chain(mv.water.iter())
                .copied()
                .collect();
            let distinct: fnv::FnvHashSet<Location> = all.iter().copied().collect();

            assert_eq!(all.len(), distinct.len());
            assert!(all.iter().all(|c| land.unoccupied(*c)));
        }
    }
}
