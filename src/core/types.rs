//! Core type aliases, re-exports and identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use glam::{IVec3, Mat4, Quat, Vec2, Vec3};

/// Standard Result type for the editor
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Stable identifier of a placed cube
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeId(pub Uuid);

impl CubeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CubeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a hinge marker. Regenerated whenever markers are rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HingeId(pub Uuid);

impl HingeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HingeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HingeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(CubeId::new(), CubeId::new());
        assert_ne!(HingeId::new(), HingeId::new());
    }

    #[test]
    fn test_cube_id_serializes_as_string() {
        let id = CubeId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: CubeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
