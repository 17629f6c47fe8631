//! Portable scene document
//!
//! Field names are part of the file format and must not change.

use serde::{Deserialize, Serialize};

use crate::core::types::{CubeId, HingeId, Result, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubeRecord {
    pub position: Position,
    pub uuid: CubeId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HingeRecord {
    pub position: Position,
    pub uuid: HingeId,
    /// Whether the hinge is selected
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub connected_cubes: Vec<CubeId>,
}

/// Cubes, cube selection and selected hinges of a scene
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default)]
    pub cubes: Vec<CubeRecord>,
    #[serde(default)]
    pub selected_cubes: Vec<CubeRecord>,
    #[serde(default)]
    pub hinge_points: Vec<HingeRecord>,
    /// Opaque hinge data written by external tools. Carried through unchanged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hinges: Vec<serde_json::Value>,
}

impl SceneDocument {
    /// Parse a document. Any structural problem is `MalformedDocument`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Compact encoding used for the key-value store
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Indented encoding used for exported files
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
            && self.selected_cubes.is_empty()
            && self.hinge_points.is_empty()
            && self.hinges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    #[test]
    fn test_field_names() {
        let cube = CubeId::new();
        let doc = SceneDocument {
            cubes: vec![CubeRecord { position: Vec3::new(2.0, -3.0, 2.0).into(), uuid: cube }],
            selected_cubes: vec![],
            hinge_points: vec![HingeRecord {
                position: Vec3::new(4.0, -1.0, 2.0).into(),
                uuid: HingeId::new(),
                status: true,
                connected_cubes: vec![cube, cube],
            }],
            hinges: vec![],
        };
        let value: serde_json::Value = serde_json::from_slice(&doc.to_bytes().unwrap()).unwrap();
        assert!(value.get("cubes").is_some());
        assert!(value.get("selectedCubes").is_some());
        let hinge = &value["hingePoints"][0];
        assert_eq!(hinge["status"], true);
        assert_eq!(hinge["position"]["y"], -1.0);
        assert_eq!(hinge["connectedCubes"][0], cube.to_string());
        assert!(value.get("hinges").is_none());
    }

    #[test]
    fn test_hinges_survive_round_trip() {
        let json = br#"{
            "cubes": [],
            "hinges": [{ "axis": "x", "angle": 90 }, "custom"]
        }"#;
        let doc = SceneDocument::from_bytes(json).unwrap();
        assert_eq!(doc.hinges.len(), 2);
        assert!(!doc.is_empty());

        let again = SceneDocument::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(again, doc);
        assert_eq!(again.hinges[0]["angle"], 90);
        assert_eq!(again.hinges[1], "custom");
    }

    #[test]
    fn test_parses_external_document() {
        let json = br#"{
            "cubes": [{ "position": { "x": 2, "y": -3, "z": 2 }, "uuid": "0b7f1d4e-8f3c-4a55-9a0e-6f1c1d2b3a41" }],
            "hingePoints": [{ "position": { "x": 4, "y": -1, "z": 2 }, "uuid": "6a0e6f1c-1d2b-4a41-8f3c-0b7f1d4e9a55" }]
        }"#;
        let doc = SceneDocument::from_bytes(json).unwrap();
        assert_eq!(doc.cubes.len(), 1);
        assert!(doc.selected_cubes.is_empty());
        assert!(!doc.hinge_points[0].status);
        assert_eq!(Vec3::from(doc.cubes[0].position), Vec3::new(2.0, -3.0, 2.0));
    }

    #[test]
    fn test_malformed_documents() {
        for bytes in [&b"{ not json"[..], b"[]", b"{\"cubes\": 3}", b"{\"cubes\": [{\"uuid\": \"nope\"}]}"] {
            assert!(matches!(SceneDocument::from_bytes(bytes), Err(Error::MalformedDocument(_))));
        }
    }
}
