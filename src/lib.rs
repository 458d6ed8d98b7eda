//! Placement engine for a turn-based grid city builder.
//!
//! Given a requested residence or factory and the current board, the engine
//! sweeps candidate placements, connects each to the road network, plans
//! parks and ponds for residences, scores every candidate and returns the
//! best one. See [`Player`] for the entry point.

pub mod amenity;
pub mod building;
pub mod candidates;
pub mod config;
pub mod cutoff;
pub mod error;
pub mod land;
pub mod location;
pub mod moves;
pub mod player;
pub mod road;
pub mod scoring;

pub use building::{Building, BuildingType, Shape};
pub use config::{EngineConfig, ScoringWeights};
pub use error::EngineError;
pub use land::{CellKinds, CellType, Land, LandView};
pub use location::Location;
pub use moves::{Move, ScoredMove};
pub use player::{Player, PlayerBuilder};
pub use road::RoadRegistry;
