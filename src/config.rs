//! Tunable engine parameters.
//!
//! Defaults reproduce the tournament-tested policy. Every field deserializes
//! with a default, so a partial override only needs the values it changes.

use serde::{Deserialize, Serialize};

/// Score contribution constants used by the scoring engine and the amenity
/// segment evaluator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score per building cell.
    pub base_building_score: i64,
    /// Penalty per open cell adjacent to the building.
    pub packing_factor_multiple: i64,
    /// Residence bonus for touching a pond.
    pub pond_bonus_score: i64,
    /// Residence bonus for touching a field.
    pub field_bonus_score: i64,
    /// Penalty per new road cell.
    pub build_road_penalty: i64,
    /// Penalty per new park or pond cell.
    pub build_park_penalty: i64,
    /// Penalty per road cell adjacent to the building.
    pub road_adj_penalty: i64,
    /// Penalty per consumed cell on the board's outer ring.
    pub perimeter_penalty: i64,
    /// Penalty per new road cell next to water or park. Also the road
    /// penalty when scoring a generated park/pond segment.
    pub road_adj_pond_penalty: i64,
    /// Bonus per open cell next to a generated park/pond segment.
    pub parkpond_packing_bonus: i64,
    /// Factory penalty per adjacent water or park cell.
    pub pond_penalty: i64,
    /// Factory bonus per adjacent factory cell.
    pub factory_bonus: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            base_building_score: 10,
            packing_factor_multiple: 10,
            pond_bonus_score: 20,
            field_bonus_score: 20,
            build_road_penalty: 5,
            build_park_penalty: 5,
            road_adj_penalty: 2,
            perimeter_penalty: 5,
            road_adj_pond_penalty: 5,
            parkpond_packing_bonus: 10,
            pond_penalty: 5,
            factory_bonus: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    /// Candidates to collect before the sweep may stop after a row.
    pub min_potential_moves: usize,
    /// Frontier levels searched when connecting to an existing park or pond.
    pub amenity_search_depth: usize,
    /// Length of a generated straight park/pond segment.
    pub amenity_segment_length: usize,
    /// Largest exponent used by the cutoff penalty `2^k`.
    pub cutoff_exponent_cap: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weights: ScoringWeights::default(),
            min_potential_moves: 20,
            amenity_search_depth: 3,
            amenity_segment_length: 4,
            cutoff_exponent_cap: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "min_potential_moves": 5, "weights": { "factory_bonus": 9 } }"#,
        )
        .unwrap();

        assert_eq!(config.min_potential_moves, 5);
        assert_eq!(config.weights.factory_bonus, 9);
        assert_eq!(config.weights.base_building_score, 10);
        assert_eq!(config.cutoff_exponent_cap, 20);
    }

    #[test]
    fn round_trips_through_json() {
        let config = EngineConfig::default();
        let text = serde_json::to_string(&config).unwrap();

        assert_eq!(serde_json::from_str::<EngineConfig>(&text).unwrap(), config);
    }
}
