//! Hingeblock - grid block-building editor core
//!
//! Cubes are placed on a fixed grid, adjacent pairs are connected through
//! hinge markers, and the scene is persisted to a key-value store or
//! exchanged as a JSON document.

pub mod core;
pub mod math;
pub mod render;
pub mod scene;
pub mod editor;
pub mod persistence;
pub mod bridge;
