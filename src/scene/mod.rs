//! Scene state: cubes, hinge markers, control cones and cube selection
//!
//! [`Scene`] ties the owners together so that removing a cube always
//! notifies the components holding back-references to it.

pub mod affordance;
pub mod grid;
pub mod hinge;
pub mod registry;
pub mod selection;

pub use affordance::ControlAffordances;
pub use grid::{AdjacencyAxis, CellKey};
pub use hinge::{CubePair, HingeEngine, HingeMarker, HingeToggle};
pub use registry::{Cube, CubeRegistry};
pub use selection::CubeSelection;

use crate::core::config::EditorConfig;
use crate::core::types::{CubeId, Result, Vec3};
use crate::render::{RenderBackend, VisualState};

#[derive(Debug)]
pub struct Scene {
    pub(crate) registry: CubeRegistry,
    pub(crate) hinges: HingeEngine,
    pub(crate) affordances: ControlAffordances,
    pub(crate) selection: CubeSelection,
}

impl Scene {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            registry: CubeRegistry::new(config.cube_size, config.grid_pitch),
            hinges: HingeEngine::new(config),
            affordances: ControlAffordances::new(config),
            selection: CubeSelection::new(config.max_selected_cubes),
        }
    }

    pub fn registry(&self) -> &CubeRegistry {
        &self.registry
    }

    pub fn hinges(&self) -> &HingeEngine {
        &self.hinges
    }

    pub fn affordances(&self) -> &ControlAffordances {
        &self.affordances
    }

    pub fn selection(&self) -> &CubeSelection {
        &self.selection
    }

    /// Place a new cube
    pub fn place_cube(&mut self, render: &mut dyn RenderBackend, position: Vec3) -> Result<CubeId> {
        Ok(self.registry.create(render, position)?.id())
    }

    /// Place a cube under a known id
    pub fn restore_cube(&mut self, render: &mut dyn RenderBackend, id: CubeId, position: Vec3) -> Result<CubeId> {
        Ok(self.registry.create_with_id(render, id, position)?.id())
    }

    /// Remove a cube along with its markers, cones and selection entry
    pub fn remove_cube(&mut self, render: &mut dyn RenderBackend, id: CubeId) -> Option<Cube> {
        let cube = self.registry.remove_by_id(render, id)?;
        self.hinges.forget_cube(render, id);
        self.affordances.forget_cube(render, id);
        self.selection.remove(id);
        Some(cube)
    }

    /// Select a cube and show it highlighted. False if already selected or full.
    pub(crate) fn select_cube(&mut self, render: &mut dyn RenderBackend, id: CubeId) -> bool {
        if self.registry.get_by_id(id).is_none() || !self.selection.push(id) {
            return false;
        }
        self.registry.set_visual(render, id, VisualState::Selected);
        true
    }

    pub(crate) fn deselect_cube(&mut self, render: &mut dyn RenderBackend, id: CubeId) -> bool {
        if !self.selection.remove(id) {
            return false;
        }
        self.registry.set_visual(render, id, VisualState::Default);
        true
    }

    /// Drop cube and hinge selection and hide the control cones
    pub(crate) fn clear_selection(&mut self, render: &mut dyn RenderBackend) {
        for id in self.selection.clear() {
            self.registry.set_visual(render, id, VisualState::Default);
        }
        self.hinges.deselect_all(render);
        self.affordances.clear(render);
    }

    /// Create (or reuse) the markers between two cubes
    pub(crate) fn ensure_hinges(&mut self, render: &mut dyn RenderBackend, a: CubeId, b: CubeId) -> bool {
        let (Some(a), Some(b)) = (self.registry.get_by_id(a), self.registry.get_by_id(b)) else {
            return false;
        };
        self.hinges.ensure_markers(render, a, b).is_some()
    }

    /// Remove everything
    pub fn clear(&mut self, render: &mut dyn RenderBackend) {
        self.affordances.clear(render);
        self.hinges.clear(render);
        self.selection.clear();
        self.registry.clear(render);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;

    #[test]
    fn test_remove_cube_cascades() {
        let config = EditorConfig::default();
        let mut render = HeadlessRenderer::default();
        let mut scene = Scene::new(&config);

        let a = scene.place_cube(&mut render, Vec3::new(2.0, -3.0, 2.0)).unwrap();
        let b = scene.place_cube(&mut render, Vec3::new(6.0, -3.0, 2.0)).unwrap();
        assert!(scene.select_cube(&mut render, a));
        assert!(scene.select_cube(&mut render, b));
        assert!(scene.ensure_hinges(&mut render, a, b));
        assert_eq!(scene.hinges().len(), 4);

        scene.remove_cube(&mut render, b).unwrap();
        assert!(scene.hinges().is_empty());
        assert_eq!(scene.selection().ids(), &[a]);
        assert_eq!(render.live_count(), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let config = EditorConfig::default();
        let mut render = HeadlessRenderer::default();
        let mut scene = Scene::new(&config);

        let a = scene.place_cube(&mut render, Vec3::new(2.0, -3.0, 2.0)).unwrap();
        let b = scene.place_cube(&mut render, Vec3::new(2.0, -3.0, 6.0)).unwrap();
        scene.ensure_hinges(&mut render, a, b);
        let cube = scene.registry().get_by_id(a).unwrap().clone();
        scene.affordances.show_for(&mut render, &cube);

        scene.clear(&mut render);
        assert!(scene.registry().is_empty());
        assert!(scene.hinges().is_empty());
        assert!(scene.affordances().is_empty());
        assert_eq!(render.live_count(), 0);
    }
}
