//! In-memory render backend with box picking
//!
//! Used by tests, benches and the command line tools. Every placeholder is
//! picked through its bounding box; spheres and cones use the box around
//! their radius.

use std::collections::HashMap;

use crate::core::camera::Camera;
use crate::core::types::{Vec2, Vec3};
use crate::math::{Aabb, Ray};
use super::backend::{PlaceholderHandle, PlaceholderKind, RenderBackend, VisualState};

/// Backend-side record of a placeholder
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub position: Vec3,
    pub visible: bool,
    pub visual: VisualState,
}

impl Placeholder {
    /// Pick volume
    pub fn bounds(&self) -> Aabb {
        match self.kind {
            PlaceholderKind::Cube { size } | PlaceholderKind::PlacementPreview { size } => {
                Aabb::cube(self.position, size)
            }
            PlaceholderKind::HingeMarker { radius } | PlaceholderKind::ControlCone { radius } => {
                Aabb::cube(self.position, radius * 2.0)
            }
        }
    }
}

/// Render backend that keeps placeholders in a map and never draws
#[derive(Debug)]
pub struct HeadlessRenderer {
    placeholders: HashMap<PlaceholderHandle, Placeholder>,
    next_handle: u64,
    camera: Camera,
    viewport: Vec2,
}

impl HeadlessRenderer {
    pub fn new(camera: Camera, viewport: Vec2) -> Self {
        Self {
            placeholders: HashMap::new(),
            next_handle: 1,
            camera,
            viewport,
        }
    }

    pub fn placeholder(&self, handle: PlaceholderHandle) -> Option<&Placeholder> {
        self.placeholders.get(&handle)
    }

    /// Number of placeholders currently alive
    pub fn live_count(&self) -> usize {
        self.placeholders.len()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Resize the viewport used for pointer rays
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.set_aspect(width, height);
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        let viewport = Vec2::new(1280.0, 720.0);
        let mut camera = Camera::default();
        camera.set_aspect(viewport.x, viewport.y);
        Self::new(camera, viewport)
    }
}

impl RenderBackend for HeadlessRenderer {
    fn create_placeholder(&mut self, kind: PlaceholderKind, position: Vec3) -> PlaceholderHandle {
        let handle = PlaceholderHandle(self.next_handle);
        self.next_handle += 1;
        self.placeholders.insert(handle, Placeholder {
            kind,
            position,
            visible: true,
            visual: VisualState::Default,
        });
        handle
    }

    fn remove_placeholder(&mut self, handle: PlaceholderHandle) {
        self.placeholders.remove(&handle);
    }

    fn set_position(&mut self, handle: PlaceholderHandle, position: Vec3) {
        if let Some(p) = self.placeholders.get_mut(&handle) {
            p.position = position;
        }
    }

    fn set_visible(&mut self, handle: PlaceholderHandle, visible: bool) {
        if let Some(p) = self.placeholders.get_mut(&handle) {
            p.visible = visible;
        }
    }

    fn set_visual(&mut self, handle: PlaceholderHandle, state: VisualState) {
        if let Some(p) = self.placeholders.get_mut(&handle) {
            p.visual = state;
        }
    }

    fn intersect(&self, ray: &Ray, handles: &[PlaceholderHandle]) -> Option<PlaceholderHandle> {
        handles
            .iter()
            .filter_map(|handle| {
                let p = self.placeholders.get(handle).filter(|p| p.visible)?;
                let (t_near, _) = ray.intersects_aabb(&p.bounds())?;
                Some((*handle, t_near))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    fn pointer_to_ray(&self, screen: Vec2) -> Ray {
        self.camera.screen_to_ray(screen, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f32) -> PlaceholderKind {
        PlaceholderKind::Cube { size }
    }

    #[test]
    fn test_handles_are_unique() {
        let mut r = HeadlessRenderer::default();
        let a = r.create_placeholder(cube(4.0), Vec3::ZERO);
        let b = r.create_placeholder(cube(4.0), Vec3::ZERO);
        assert_ne!(a, b);
        assert_eq!(r.live_count(), 2);

        r.remove_placeholder(a);
        assert_eq!(r.live_count(), 1);
        assert!(r.placeholder(a).is_none());
    }

    #[test]
    fn test_intersect_returns_nearest() {
        let mut r = HeadlessRenderer::default();
        let far = r.create_placeholder(cube(4.0), Vec3::new(0.0, 0.0, -20.0));
        let near = r.create_placeholder(cube(4.0), Vec3::new(0.0, 0.0, -10.0));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(r.intersect(&ray, &[far, near]), Some(near));
        assert_eq!(r.intersect(&ray, &[far]), Some(far));
    }

    #[test]
    fn test_invisible_placeholders_are_not_hit() {
        let mut r = HeadlessRenderer::default();
        let h = r.create_placeholder(PlaceholderKind::HingeMarker { radius: 0.5 }, Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(r.intersect(&ray, &[h]), Some(h));

        r.set_visible(h, false);
        assert_eq!(r.intersect(&ray, &[h]), None);
    }

    #[test]
    fn test_visual_state_is_tracked() {
        let mut r = HeadlessRenderer::default();
        let h = r.create_placeholder(cube(1.0), Vec3::ZERO);
        assert_eq!(r.placeholder(h).unwrap().visual, VisualState::Default);
        r.set_visual(h, VisualState::Selected);
        assert_eq!(r.placeholder(h).unwrap().visual, VisualState::Selected);
    }
}
