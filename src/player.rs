//! Public entry point: the per-board player.
//!
//! `Player` owns the only state that survives between turns, the road
//! registry and the residential construction frontier. The host calls
//! `init` once per board, then `play` once per request, and applies the
//! returned move to its board before the next call.

use crate::building::*;
use crate::candidates::*;
use crate::config::*;
use crate::error::EngineError;
use crate::land::*;
use crate::moves::*;
use crate::road::*;
use log::*;

pub struct Player {
    config: EngineConfig,
    road_cells: RoadRegistry,
    frontier: usize,
}

impl Default for Player {
    fn default() -> Self {
        Player::new(EngineConfig::default())
    }
}

impl Player {
    pub fn new(config: EngineConfig) -> Self {
        Player {
            config,
            road_cells: RoadRegistry::new(),
            frontier: 0,
        }
    }

    /// Forget everything learned about the previous board.
    pub fn init(&mut self) {
        self.road_cells = RoadRegistry::new();
        self.frontier = 0;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn road_cells(&self) -> &RoadRegistry {
        &self.road_cells
    }

    /// Furthest row reached by an accepted residence.
    pub fn frontier(&self) -> usize {
        self.frontier
    }

    /// Choose a placement for `request` and record its roads.
    ///
    /// Fails with `EngineError::NoCandidates` when no buildable, connectable
    /// placement exists; nothing is recorded in that case.
    pub fn play(&mut self, request: &Building, land: &dyn LandView) -> Result<Move, EngineError> {
        let (candidates, stats) =
            generate_candidates(request, land, &self.road_cells, self.frontier, &self.config);

        let best = select_best(candidates).ok_or(EngineError::NoCandidates {
            building_type: request.building_type(),
        })?;

        debug!(
            "{:?} placed at ({}, {}) rotation {} score {} (road {}, park {}, water {}, {} candidates)",
            request.building_type(),
            best.mv.location.row,
            best.mv.location.col,
            best.mv.rotation,
            best.score,
            best.mv.road.len(),
            best.mv.park.len(),
            best.mv.water.len(),
            stats.candidates
        );

        let mv = best.mv;
        self.commit(&mv, land);
        Ok(mv)
    }

    /// Like `play`, but reports failure as a move the host must not apply.
    pub fn play_or_reject(&mut self, request: &Building, land: &dyn LandView) -> Move {
        match self.play(request, land) {
            Ok(mv) => mv,
            Err(err) => {
                warn!("Rejecting request: {}", err);
                Move::rejected(request.clone())
            }
        }
    }

    fn commit(&mut self, mv: &Move, land: &dyn LandView) {
        self.road_cells.extend(mv.road.iter().copied());

        if mv.accept && mv.building_type() == BuildingType::Residence {
            let last_row = (land.side() - 1).max(0) as usize;
            let row = mv.location.row.max(0) as usize;
            self.frontier = self.frontier.max(row).min(last_row);
        }
    }
}

/// Highest scoring candidate. Among equal scores the earliest one wins, which
/// makes the choice follow the sweep order.
pub fn select_best(candidates: Vec<ScoredMove>) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;

    for candidate in candidates {
        match &best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }

    best
}

/// Fluent construction of a `Player` with non-default parameters.
pub struct PlayerBuilder {
    config: EngineConfig,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        PlayerBuilder {
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn weights(mut self, weights: ScoringWeights) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn min_potential_moves(mut self, count: usize) -> Self {
        self.config.min_potential_moves = count;
        self
    }

    pub fn amenity_search_depth(mut self, depth: usize) -> Self {
        self.config.amenity_search_depth = depth;
        self
    }

    pub fn amenity_segment_length(mut self, length: usize) -> Self {
        self.config.amenity_segment_length = length;
        self
    }

    pub fn cutoff_exponent_cap(mut self, cap: u32) -> Self {
        self.config.cutoff_exponent_cap = cap;
        self
    }

    pub fn build(self) -> Player {
        Player::new(self.config)
    }
}

impl Default for PlayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
