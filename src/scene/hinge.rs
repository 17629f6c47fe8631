//! Adjacency and hinge engine
//!
//! Owns the hinge markers synthesized on the shared face of two adjacent
//! cubes. Markers for a pair are created once, the first time the pair is
//! selected together, and live until one of their cubes is removed or the
//! scene is cleared.

use std::collections::HashMap;

use crate::core::config::EditorConfig;
use crate::core::error::Error;
use crate::core::types::{CubeId, HingeId, Result, Vec3};
use crate::editor::EditorMode;
use crate::math::Ray;
use crate::render::{PlaceholderHandle, PlaceholderKind, RenderBackend, VisualState};
use super::grid;
use super::registry::Cube;

/// Unordered pair of cube ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubePair(CubeId, CubeId);

impl CubePair {
    pub fn new(a: CubeId, b: CubeId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn contains(&self, id: CubeId) -> bool {
        self.0 == id || self.1 == id
    }

    pub fn ids(&self) -> [CubeId; 2] {
        [self.0, self.1]
    }
}

/// Connection point on one edge of the face shared by two adjacent cubes
#[derive(Clone, Debug, PartialEq)]
pub struct HingeMarker {
    id: HingeId,
    position: Vec3,
    connected: [CubeId; 2],
    selected: bool,
    visible: bool,
    hovered: bool,
    handle: PlaceholderHandle,
}

impl HingeMarker {
    pub fn id(&self) -> HingeId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Ids of the two cubes this hinge joins, in selection order
    pub fn connected_cube_ids(&self) -> [CubeId; 2] {
        self.connected
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn handle(&self) -> PlaceholderHandle {
        self.handle
    }

    fn visual(&self) -> VisualState {
        if self.selected {
            VisualState::Selected
        } else if self.hovered {
            VisualState::Preview
        } else {
            VisualState::Default
        }
    }
}

/// Result of toggling a marker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HingeToggle {
    Selected,
    Deselected,
}

#[derive(Debug)]
pub struct HingeEngine {
    markers: Vec<HingeMarker>,
    by_pair: HashMap<CubePair, [HingeId; 4]>,
    /// Selected markers in selection order
    selected: Vec<HingeId>,
    capacity: usize,
    visible: bool,
    config: EditorConfig,
}

impl HingeEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            markers: Vec::new(),
            by_pair: HashMap::new(),
            selected: Vec::new(),
            capacity: config.max_selected_hinges,
            visible: false,
            config: config.clone(),
        }
    }

    /// Whether two cubes share a face
    pub fn are_adjacent(&self, a: &Cube, b: &Cube) -> bool {
        grid::are_adjacent(a.position(), b.position(), self.config.grid_pitch)
    }

    /// Return the four markers of the pair, creating them on first use.
    ///
    /// Returns `None` when the cubes are not adjacent.
    pub fn ensure_markers(
        &mut self,
        render: &mut dyn RenderBackend,
        a: &Cube,
        b: &Cube,
    ) -> Option<[HingeId; 4]> {
        let pair = CubePair::new(a.id(), b.id());
        if let Some(ids) = self.by_pair.get(&pair).copied() {
            for id in ids {
                self.apply_visibility(render, id);
            }
            return Some(ids);
        }

        let positions = grid::hinge_positions(a.position(), b.position(), &self.config)?;
        let kind = PlaceholderKind::HingeMarker { radius: self.config.marker_radius };
        let ids = positions.map(|position| {
            let handle = render.create_placeholder(kind, position);
            render.set_visible(handle, self.visible);
            let marker = HingeMarker {
                id: HingeId::new(),
                position,
                connected: [a.id(), b.id()],
                selected: false,
                visible: self.visible,
                hovered: false,
                handle,
            };
            let id = marker.id;
            self.markers.push(marker);
            id
        });
        self.by_pair.insert(pair, ids);
        log::debug!("Created hinge markers between {} and {}", a.id(), b.id());
        Some(ids)
    }

    /// Markers already created for a pair
    pub fn markers_for(&self, a: CubeId, b: CubeId) -> Option<[HingeId; 4]> {
        self.by_pair.get(&CubePair::new(a, b)).copied()
    }

    /// Toggle selection of a marker.
    ///
    /// Selecting beyond capacity fails with `CapacityExceeded` and leaves the
    /// current selection untouched.
    pub fn select_hinge(&mut self, render: &mut dyn RenderBackend, id: HingeId) -> Result<HingeToggle> {
        let currently = self.get(id).map(|m| m.selected).unwrap_or(false);
        self.set_selected(render, id, !currently)?;
        Ok(if currently { HingeToggle::Deselected } else { HingeToggle::Selected })
    }

    /// Force the selected flag of a marker. Unknown ids are ignored.
    pub fn set_selected(&mut self, render: &mut dyn RenderBackend, id: HingeId, selected: bool) -> Result<()> {
        let capacity = self.capacity;
        let in_selection = self.selected.contains(&id);
        let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) else {
            return Ok(());
        };

        if selected && !in_selection {
            if self.selected.len() >= capacity {
                return Err(Error::CapacityExceeded { capacity });
            }
            self.selected.push(id);
        } else if !selected {
            self.selected.retain(|s| *s != id);
        }
        marker.selected = selected;
        render.set_visual(marker.handle, marker.visual());
        Ok(())
    }

    /// Reset `selected` on every marker. Markers are kept.
    pub fn deselect_all(&mut self, render: &mut dyn RenderBackend) {
        self.selected.clear();
        for marker in &mut self.markers {
            marker.selected = false;
            render.set_visual(marker.handle, marker.visual());
        }
    }

    /// Markers are visible only in hinge mode
    pub fn set_mode_visibility(&mut self, render: &mut dyn RenderBackend, mode: EditorMode) {
        self.visible = mode.shows_hinges();
        let ids: Vec<_> = self.markers.iter().map(|m| m.id).collect();
        for id in ids {
            self.apply_visibility(render, id);
        }
    }

    fn apply_visibility(&mut self, render: &mut dyn RenderBackend, id: HingeId) {
        let visible = self.visible;
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) {
            marker.visible = visible;
            render.set_visible(marker.handle, visible);
        }
    }

    /// Nearest marker hit by the ray
    pub fn intersect_markers(&self, render: &dyn RenderBackend, ray: &Ray) -> Option<HingeId> {
        let handles: Vec<_> = self.markers.iter().map(|m| m.handle).collect();
        let hit = render.intersect(ray, &handles)?;
        self.markers.iter().find(|m| m.handle == hit).map(|m| m.id)
    }

    /// Show `hovered` in the preview state and revert every other unselected marker
    pub fn hover(&mut self, render: &mut dyn RenderBackend, hovered: Option<HingeId>) {
        for marker in &mut self.markers {
            let hover = hovered == Some(marker.id) && !marker.selected;
            if marker.hovered != hover {
                marker.hovered = hover;
                render.set_visual(marker.handle, marker.visual());
            }
        }
    }

    /// Live marker closest to `position`, if within `tolerance`
    pub fn find_near(&self, position: Vec3, tolerance: f32) -> Option<HingeId> {
        self.markers
            .iter()
            .map(|m| (m.id, m.position.distance(position)))
            .filter(|(_, d)| *d < tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Drop every marker attached to a removed cube
    pub fn forget_cube(&mut self, render: &mut dyn RenderBackend, cube: CubeId) -> usize {
        let pairs: Vec<_> = self.by_pair.keys().filter(|p| p.contains(cube)).copied().collect();
        let mut removed = 0;
        for pair in pairs {
            if let Some(ids) = self.by_pair.remove(&pair) {
                for id in ids {
                    self.remove_marker(render, id);
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            log::debug!("Removed {} orphaned hinge markers of cube {}", removed, cube);
        }
        removed
    }

    fn remove_marker(&mut self, render: &mut dyn RenderBackend, id: HingeId) {
        self.selected.retain(|s| *s != id);
        if let Some(index) = self.markers.iter().position(|m| m.id == id) {
            let marker = self.markers.remove(index);
            render.remove_placeholder(marker.handle);
        }
    }

    /// Remove every marker
    pub fn clear(&mut self, render: &mut dyn RenderBackend) {
        for marker in self.markers.drain(..) {
            render.remove_placeholder(marker.handle);
        }
        self.by_pair.clear();
        self.selected.clear();
    }

    pub fn get(&self, id: HingeId) -> Option<&HingeMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn markers(&self) -> &[HingeMarker] {
        &self.markers
    }

    /// Selected markers in selection order
    pub fn selected(&self) -> impl Iterator<Item = &HingeMarker> {
        self.selected.iter().filter_map(|id| self.get(*id))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
