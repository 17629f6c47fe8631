//! Placeholder handles and the backend trait

use crate::core::types::{Vec2, Vec3};
use crate::math::Ray;

/// Opaque handle to a visual object owned by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaceholderHandle(pub u64);

/// What a placeholder represents, with the extent needed for picking
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaceholderKind {
    /// A placed cube with edge `size`
    Cube { size: f32 },
    /// Translucent cube showing where a click would place
    PlacementPreview { size: f32 },
    /// Sphere marking a hinge position
    HingeMarker { radius: f32 },
    /// Directional control cone around a selected cube
    ControlCone { radius: f32 },
}

/// Material state a backend should show for a placeholder
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
    #[default]
    Default,
    /// Hovered but not selected
    Preview,
    Selected,
    /// Clicked control cone
    Active,
}

/// Everything the editor core needs from a rendering library
pub trait RenderBackend {
    /// Create a visible placeholder at `position`
    fn create_placeholder(&mut self, kind: PlaceholderKind, position: Vec3) -> PlaceholderHandle;

    /// Remove a placeholder and release its resources. Unknown handles are ignored.
    fn remove_placeholder(&mut self, handle: PlaceholderHandle);

    /// Move an existing placeholder
    fn set_position(&mut self, handle: PlaceholderHandle, position: Vec3);

    fn set_visible(&mut self, handle: PlaceholderHandle, visible: bool);

    fn set_visual(&mut self, handle: PlaceholderHandle, state: VisualState);

    /// Nearest visible placeholder among `handles` hit by `ray`
    fn intersect(&self, ray: &Ray, handles: &[PlaceholderHandle]) -> Option<PlaceholderHandle>;

    /// Ray through a pointer position given in viewport pixels
    fn pointer_to_ray(&self, screen: Vec2) -> Ray;
}
