//! Grid lattice rules: cell keys, snapping, adjacency and hinge placement

use crate::core::config::EditorConfig;
use crate::core::types::{IVec3, Vec3};

/// Positions closer than this on an axis count as equal
const AXIS_EPSILON: f32 = 1e-4;

/// Discretized cell a cube occupies. At most one cube per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey(pub IVec3);

impl CellKey {
    /// Lattice cell of size `pitch` containing `position`
    pub fn from_position(position: Vec3, pitch: f32) -> Self {
        Self((position / pitch).floor().as_ivec3())
    }
}

/// Axis along which two adjacent cubes are neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdjacencyAxis {
    X,
    Z,
}

fn same(a: f32, b: f32) -> bool {
    (a - b).abs() < AXIS_EPSILON
}

/// Center of the cell hit on the ground plane, lifted to `layer`
pub fn snap_to_cell(ground_hit: Vec3, layer: u32, config: &EditorConfig) -> Vec3 {
    let pitch = config.grid_pitch;
    Vec3::new(
        (ground_hit.x / pitch).floor() * pitch + pitch * 0.5,
        config.base_height + layer as f32 * config.layer_height,
        (ground_hit.z / pitch).floor() * pitch + pitch * 0.5,
    )
}

/// Axis of adjacency, if the cubes share `y` and are one pitch apart along
/// exactly one of `x` / `z`
pub fn adjacency_axis(a: Vec3, b: Vec3, pitch: f32) -> Option<AdjacencyAxis> {
    if !same(a.y, b.y) {
        return None;
    }
    let dx = (a.x - b.x).abs();
    let dz = (a.z - b.z).abs();
    if same(dx, pitch) && same(dz, 0.0) {
        Some(AdjacencyAxis::X)
    } else if same(dx, 0.0) && same(dz, pitch) {
        Some(AdjacencyAxis::Z)
    } else {
        None
    }
}

pub fn are_adjacent(a: Vec3, b: Vec3, pitch: f32) -> bool {
    adjacency_axis(a, b, pitch).is_some()
}

/// Midpoints of the four edges of the face shared by two adjacent cubes
pub fn hinge_positions(a: Vec3, b: Vec3, config: &EditorConfig) -> Option<[Vec3; 4]> {
    let half = config.half_cube();
    let mid = (a + b) * 0.5;
    let positions = match adjacency_axis(a, b, config.grid_pitch)? {
        AdjacencyAxis::X => [
            mid + Vec3::new(0.0, 0.0, half),
            mid - Vec3::new(0.0, 0.0, half),
            mid + Vec3::new(0.0, half, 0.0),
            mid - Vec3::new(0.0, half, 0.0),
        ],
        AdjacencyAxis::Z => [
            mid - Vec3::new(half, 0.0, 0.0),
            mid + Vec3::new(half, 0.0, 0.0),
            mid + Vec3::new(0.0, half, 0.0),
            mid - Vec3::new(0.0, half, 0.0),
        ],
    };
    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_absorbs_drift() {
        let a = CellKey::from_position(Vec3::new(2.0, -3.0, 6.0), 4.0);
        let b = CellKey::from_position(Vec3::new(2.00001, -2.99999, 6.0), 4.0);
        assert_eq!(a, b);
        assert_eq!(a.0, IVec3::new(0, -1, 1));
    }

    #[test]
    fn test_cell_key_follows_pitch() {
        let a = CellKey::from_position(Vec3::new(0.75, 0.0, 0.25), 0.5);
        let b = CellKey::from_position(Vec3::new(1.25, 0.0, 0.25), 0.5);
        assert_ne!(a, b);
        assert_eq!(b.0, IVec3::new(2, 0, 0));

        let wide = CellKey::from_position(Vec3::new(5.0, 0.0, 5.0), 10.0);
        assert_eq!(wide, CellKey::from_position(Vec3::new(9.0, 0.0, 1.0), 10.0));
    }

    #[test]
    fn test_snap_to_cell() {
        let cfg = EditorConfig::default();
        assert_eq!(snap_to_cell(Vec3::new(1.3, 0.0, 3.9), 0, &cfg), Vec3::new(2.0, -3.0, 2.0));
        assert_eq!(snap_to_cell(Vec3::new(-0.5, 0.0, 4.1), 0, &cfg), Vec3::new(-2.0, -3.0, 6.0));
        assert_eq!(snap_to_cell(Vec3::new(5.0, 0.0, 1.0), 2, &cfg), Vec3::new(6.0, 5.0, 2.0));
    }

    #[test]
    fn test_adjacency() {
        let a = Vec3::new(2.0, -3.0, 2.0);
        assert_eq!(adjacency_axis(a, Vec3::new(6.0, -3.0, 2.0), 4.0), Some(AdjacencyAxis::X));
        assert_eq!(adjacency_axis(a, Vec3::new(2.0, -3.0, -2.0), 4.0), Some(AdjacencyAxis::Z));
        // diagonal
        assert!(!are_adjacent(a, Vec3::new(6.0, -3.0, 6.0), 4.0));
        // stacked
        assert!(!are_adjacent(a, Vec3::new(2.0, 1.0, 2.0), 4.0));
        // too far
        assert!(!are_adjacent(a, Vec3::new(14.0, -3.0, 2.0), 4.0));
        // same cell
        assert!(!are_adjacent(a, a, 4.0));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let points = [
            Vec3::new(2.0, -3.0, 2.0),
            Vec3::new(6.0, -3.0, 2.0),
            Vec3::new(2.0, -3.0, 6.0),
            Vec3::new(6.0, 1.0, 2.0),
            Vec3::new(-2.0, -3.0, 2.0),
        ];
        for a in points {
            for b in points {
                assert_eq!(are_adjacent(a, b, 4.0), are_adjacent(b, a, 4.0));
            }
        }
    }

    #[test]
    fn test_hinge_positions_along_x() {
        let cfg = EditorConfig::default();
        let hinges = hinge_positions(Vec3::new(2.0, -3.0, 2.0), Vec3::new(6.0, -3.0, 2.0), &cfg).unwrap();
        assert_eq!(hinges, [
            Vec3::new(4.0, -3.0, 4.0),
            Vec3::new(4.0, -3.0, 0.0),
            Vec3::new(4.0, -1.0, 2.0),
            Vec3::new(4.0, -5.0, 2.0),
        ]);
    }

    #[test]
    fn test_hinge_positions_along_z() {
        let cfg = EditorConfig::default();
        let hinges = hinge_positions(Vec3::new(2.0, -3.0, 2.0), Vec3::new(2.0, -3.0, 6.0), &cfg).unwrap();
        assert_eq!(hinges, [
            Vec3::new(0.0, -3.0, 4.0),
            Vec3::new(4.0, -3.0, 4.0),
            Vec3::new(2.0, -1.0, 4.0),
            Vec3::new(2.0, -5.0, 4.0),
        ]);
    }

    #[test]
    fn test_hinge_positions_require_adjacency() {
        let cfg = EditorConfig::default();
        assert!(hinge_positions(Vec3::new(2.0, -3.0, 2.0), Vec3::new(2.0, 1.0, 2.0), &cfg).is_none());
    }
}
