//! Error types for the editor core

use thiserror::Error;

use crate::core::types::{CubeId, Vec3};

/// Main error type for the editor
#[derive(Debug, Error)]
pub enum Error {
    #[error("cell at {position} is already occupied by cube {occupant}")]
    OccupiedCell { position: Vec3, occupant: CubeId },

    #[error("cube {candidate} is not adjacent to selected cube {selected}")]
    NonAdjacentSelection { selected: CubeId, candidate: CubeId },

    #[error("selection capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    #[error("Malformed scene document: {0}")]
    MalformedDocument(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}
