//! Interaction modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Active editor mode. Only changed through `Editor::set_mode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Place and remove cubes
    #[default]
    Create,
    /// Connect cubes through hinge markers
    Hinge,
    /// Inspect and select only
    Demo,
}

impl EditorMode {
    pub const ALL: [EditorMode; 3] = [EditorMode::Create, EditorMode::Hinge, EditorMode::Demo];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Create => "create",
            EditorMode::Hinge => "hinge",
            EditorMode::Demo => "demo",
        }
    }

    /// Whether hinge markers are shown
    pub fn shows_hinges(&self) -> bool {
        *self == EditorMode::Hinge
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown editor mode: {}", s))
    }
}
