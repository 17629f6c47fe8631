//! Directional control cones shown around a single selected cube

use crate::core::config::EditorConfig;
use crate::core::types::{CubeId, Vec3};
use crate::math::Ray;
use crate::render::{PlaceholderHandle, PlaceholderKind, RenderBackend, VisualState};
use super::registry::Cube;

/// Up, down, left, right, front, back
const DIRECTIONS: [Vec3; 6] = [Vec3::Y, Vec3::NEG_Y, Vec3::NEG_X, Vec3::X, Vec3::Z, Vec3::NEG_Z];

#[derive(Debug)]
pub struct ControlAffordances {
    anchor: Option<CubeId>,
    cones: Vec<PlaceholderHandle>,
    active: Option<usize>,
    distance: f32,
    radius: f32,
}

impl ControlAffordances {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            anchor: None,
            cones: Vec::new(),
            active: None,
            distance: config.half_cube() + config.affordance_offset,
            radius: config.affordance_radius,
        }
    }

    /// Replace any current cones with six around `cube`
    pub fn show_for(&mut self, render: &mut dyn RenderBackend, cube: &Cube) {
        self.clear(render);
        let kind = PlaceholderKind::ControlCone { radius: self.radius };
        self.cones = DIRECTIONS
            .iter()
            .map(|dir| render.create_placeholder(kind, cube.position() + *dir * self.distance))
            .collect();
        self.anchor = Some(cube.id());
    }

    /// Index of the cone hit by the ray
    pub fn intersect(&self, render: &dyn RenderBackend, ray: &Ray) -> Option<usize> {
        let hit = render.intersect(ray, &self.cones)?;
        self.cones.iter().position(|h| *h == hit)
    }

    /// Highlight a cone. Nothing else happens yet.
    pub fn activate(&mut self, render: &mut dyn RenderBackend, index: usize) {
        for (i, handle) in self.cones.iter().enumerate() {
            let state = if i == index { VisualState::Active } else { VisualState::Default };
            render.set_visual(*handle, state);
        }
        self.active = (index < self.cones.len()).then_some(index);
    }

    /// Drop the `Active` highlight, keeping the cones
    pub fn deactivate(&mut self, render: &mut dyn RenderBackend) {
        for handle in &self.cones {
            render.set_visual(*handle, VisualState::Default);
        }
        self.active = None;
    }

    /// Clear the cones if they belong to `cube`
    pub fn forget_cube(&mut self, render: &mut dyn RenderBackend, cube: CubeId) {
        if self.anchor == Some(cube) {
            self.clear(render);
        }
    }

    pub fn clear(&mut self, render: &mut dyn RenderBackend) {
        for handle in self.cones.drain(..) {
            render.remove_placeholder(handle);
        }
        self.anchor = None;
        self.active = None;
    }

    pub fn anchor(&self) -> Option<CubeId> {
        self.anchor
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;
    use crate::scene::registry::CubeRegistry;

    #[test]
    fn test_cones_surround_cube() {
        let config = EditorConfig::default();
        let mut render = HeadlessRenderer::default();
        let mut registry = CubeRegistry::new(config.cube_size, config.grid_pitch);
        let cube = registry.create(&mut render, Vec3::new(2.0, -3.0, 2.0)).unwrap().clone();

        let mut cones = ControlAffordances::new(&config);
        cones.show_for(&mut render, &cube);
        assert_eq!(cones.len(), 6);
        assert_eq!(cones.anchor(), Some(cube.id()));

        // cone above the cube sits at half size + offset
        let ray = Ray::new(Vec3::new(2.0, 20.0, 2.0), Vec3::NEG_Y);
        let index = cones.intersect(&render, &ray).unwrap();
        assert_eq!(index, 0);

        cones.activate(&mut render, index);
        assert_eq!(cones.active(), Some(0));
        cones.deactivate(&mut render);
        assert_eq!(cones.active(), None);
        assert_eq!(cones.len(), 6);

        cones.forget_cube(&mut render, cube.id());
        assert!(cones.is_empty());
        // only the cube placeholder is left
        assert_eq!(render.live_count(), 1);
    }
}
