use crate::building::BuildingType;
use crate::location::Location;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The sweep found no buildable, road-connectable placement for the request.
    NoCandidates { building_type: BuildingType },
    /// A move referenced a rotation the request does not have.
    InvalidRotation { rotation: usize, available: usize },
    /// A move touched a cell outside the board.
    OutOfBounds { location: Location },
    /// A move tried to build on a cell that is not empty.
    Occupied { location: Location },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoCandidates { building_type } => {
                write!(f, "no valid placement found for {:?} request", building_type)
            }
            EngineError::InvalidRotation {
                rotation,
                available,
            } => write!(
                f,
                "rotation {} requested but building has {} rotations",
                rotation, available
            ),
            EngineError::OutOfBounds { location } => write!(
                f,
                "cell ({}, {}) is outside the board",
                location.row, location.col
            ),
            EngineError::Occupied { location } => write!(
                f,
                "cell ({}, {}) is already occupied",
                location.row, location.col
            ),
        }
    }
}

impl std::error::Error for EngineError {}
