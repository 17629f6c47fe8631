//! Editor configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;

/// Tunable constants for grid layout, selection caps and persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Spacing between adjacent cell centers
    pub grid_pitch: f32,
    /// Edge length of a placed cube
    pub cube_size: f32,
    /// Vertical distance between build layers
    pub layer_height: f32,
    /// Center height of a cube placed on layer 0
    pub base_height: f32,
    /// Height of the horizontal plane placement rays are cast against
    pub ground_height: f32,
    /// Cubes that may be selected at once
    pub max_selected_cubes: usize,
    /// Hinge markers that may be selected at once
    pub max_selected_hinges: usize,
    /// Max distance between a stored hinge position and a live marker to count as the same hinge
    pub hinge_match_tolerance: f32,
    /// Key the scene document is stored under
    pub storage_key: String,
    /// Gap between a cube face and its control cone
    pub affordance_offset: f32,
    /// Pick radius of a hinge marker
    pub marker_radius: f32,
    /// Pick radius of a control cone
    pub affordance_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_pitch: 4.0,
            cube_size: 4.0,
            layer_height: 4.0,
            base_height: -3.0,
            ground_height: 0.0,
            max_selected_cubes: 2,
            max_selected_hinges: 4,
            hinge_match_tolerance: 0.1,
            storage_key: "scene_state".to_string(),
            affordance_offset: 1.0,
            marker_radius: 0.5,
            affordance_radius: 0.5,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Half the cube edge, the offset from a cube center to its faces
    pub fn half_cube(&self) -> f32 {
        self.cube_size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.grid_pitch, 4.0);
        assert_eq!(cfg.max_selected_cubes, 2);
        assert_eq!(cfg.max_selected_hinges, 4);
        assert_eq!(cfg.half_cube(), 2.0);
        assert_eq!(cfg.storage_key, "scene_state");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "hinge_match_tolerance": 0.25, "storage_key": "other" }}"#).unwrap();

        let cfg = EditorConfig::load(file.path()).unwrap();
        assert_eq!(cfg.hinge_match_tolerance, 0.25);
        assert_eq!(cfg.storage_key, "other");
        assert_eq!(cfg.grid_pitch, 4.0);
    }

    #[test]
    fn test_load_garbage_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            EditorConfig::load(file.path()),
            Err(crate::core::Error::MalformedDocument(_))
        ));
    }
}
