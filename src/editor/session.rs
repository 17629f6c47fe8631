//! Interaction mode state machine
//!
//! [`Editor`] owns the scene, the render backend and the persistence layer,
//! routes pointer and key input according to the active [`EditorMode`] and
//! auto-saves after every action that changed the scene.

use crate::core::config::EditorConfig;
use crate::core::error::Error;
use crate::core::input::{InputAction, LayerStep, PointerButton};
use crate::core::types::{CubeId, Result, Vec3};
use crate::math::Ray;
use crate::persistence::{self, KeyValueStore, RestoreReport, SceneDocument, ScenePersistence};
use crate::render::{PlaceholderHandle, PlaceholderKind, RenderBackend};
use crate::scene::{grid, HingeToggle, Scene};
use super::mode::EditorMode;
use super::pointer::{PointerEvent, PointerOutcome};

pub struct Editor<R: RenderBackend, S: KeyValueStore> {
    config: EditorConfig,
    mode: EditorMode,
    scene: Scene,
    /// Build layer for new cubes in create mode
    current_layer: u32,
    preview: Option<PlaceholderHandle>,
    renderer: R,
    persistence: ScenePersistence<S>,
    /// External hinge data carried through save and restore
    hinge_data: Vec<serde_json::Value>,
}

impl<R: RenderBackend, S: KeyValueStore> Editor<R, S> {
    /// Create an editor with an empty scene
    pub fn new(config: EditorConfig, renderer: R, store: S) -> Self {
        let persistence = ScenePersistence::new(store, config.storage_key.clone());
        let mut editor = Self {
            scene: Scene::new(&config),
            config,
            mode: EditorMode::default(),
            current_layer: 0,
            preview: None,
            renderer,
            persistence,
            hinge_data: Vec::new(),
        };
        editor.apply_mode(EditorMode::default());
        editor
    }

    /// Create an editor and restore the stored scene, if any
    pub fn open(config: EditorConfig, renderer: R, store: S) -> Self {
        let mut editor = Self::new(config, renderer, store);
        if let Err(err) = editor.load_saved() {
            log::warn!("Stored scene not loaded: {}", err);
        }
        editor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn current_layer(&self) -> u32 {
        self.current_layer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn persistence(&self) -> &ScenePersistence<S> {
        &self.persistence
    }

    /// Placement preview placeholder, when one has been created
    pub fn preview(&self) -> Option<PlaceholderHandle> {
        self.preview
    }

    /// Switch mode. Selection is kept; hover and preview state is reset.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode != self.mode {
            log::info!("Mode {} -> {}", self.mode, mode);
        }
        self.apply_mode(mode);
    }

    fn apply_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.scene.hinges.hover(&mut self.renderer, None);
        self.scene.hinges.set_mode_visibility(&mut self.renderer, mode);
        self.sync_affordances();
        self.hide_preview();
    }

    /// Cones follow the last selected cube in demo mode and a lone selected
    /// cube in hinge mode; any `Active` highlight is dropped.
    fn sync_affordances(&mut self) {
        let render = &mut self.renderer;
        let scene = &mut self.scene;
        let ids = scene.selection.ids();
        let anchor = match self.mode {
            EditorMode::Demo => ids.last().copied(),
            EditorMode::Hinge if ids.len() == 1 => ids.first().copied(),
            _ => None,
        };

        match anchor.and_then(|id| scene.registry.get_by_id(id)) {
            Some(cube) if scene.affordances.anchor() == Some(cube.id()) => scene.affordances.deactivate(render),
            Some(cube) => scene.affordances.show_for(render, cube),
            None => scene.affordances.clear(render),
        }
    }

    /// Move the build layer. Only has an effect in create mode.
    pub fn step_layer(&mut self, step: LayerStep) -> u32 {
        if self.mode != EditorMode::Create {
            return self.current_layer;
        }
        self.current_layer = match step {
            LayerStep::Up => self.current_layer + 1,
            LayerStep::Down => self.current_layer.saturating_sub(1),
        };
        log::info!("Current layer: {}", self.current_layer);
        self.current_layer
    }

    /// Dispatch a decoded window input
    pub fn handle_input(&mut self, action: InputAction) -> Result<PointerOutcome> {
        match action {
            InputAction::PointerDown { button, screen, precision } => {
                let ray = self.renderer.pointer_to_ray(screen);
                self.pointer_down(PointerEvent { ray, button, precision })
            }
            InputAction::PointerMove { screen } => {
                let ray = self.renderer.pointer_to_ray(screen);
                self.pointer_move(&ray);
                Ok(PointerOutcome::Ignored)
            }
            InputAction::PointerLeave => {
                self.pointer_leave();
                Ok(PointerOutcome::Ignored)
            }
            InputAction::Layer(step) => {
                self.step_layer(step);
                Ok(PointerOutcome::Ignored)
            }
        }
    }

    /// Handle a pointer press.
    ///
    /// Rejected picks come back as `NonAdjacentSelection` or `CapacityExceeded`
    /// with the scene unchanged.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Result<PointerOutcome> {
        if !event.precision {
            return Ok(PointerOutcome::Ignored);
        }
        let ray = &event.ray;
        let outcome = match (self.mode, event.button) {
            (EditorMode::Create, PointerButton::Primary) => self.place_cube(ray),
            (EditorMode::Create, PointerButton::Secondary) => self.remove_cube(ray),
            (EditorMode::Hinge, PointerButton::Primary) => self.hinge_click(ray)?,
            (EditorMode::Demo, PointerButton::Primary) => match self.affordance_click(ray) {
                Some(outcome) => outcome,
                None => self.cube_click(ray)?,
            },
            (_, PointerButton::Secondary) => PointerOutcome::Ignored,
        };
        log::debug!("{} click: {:?}", self.mode, outcome);

        if outcome.is_mutation() {
            self.auto_save();
        }
        Ok(outcome)
    }

    /// Hover feedback: hinge preview in hinge mode, placement preview in create mode
    pub fn pointer_move(&mut self, ray: &Ray) {
        match self.mode {
            EditorMode::Hinge => {
                let hit = self.scene.hinges.intersect_markers(&self.renderer, ray);
                self.scene.hinges.hover(&mut self.renderer, hit);
            }
            EditorMode::Create => match self.target_cell(ray) {
                Some(cell) if !self.scene.registry.has_cube_at(cell) => self.show_preview(cell),
                _ => self.hide_preview(),
            },
            EditorMode::Demo => {}
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hide_preview();
        self.scene.hinges.hover(&mut self.renderer, None);
    }

    /// Grid cell a create-mode click along `ray` would fill
    fn target_cell(&self, ray: &Ray) -> Option<Vec3> {
        let hit = ray.intersect_horizontal_plane(self.config.ground_height)?;
        Some(grid::snap_to_cell(hit, self.current_layer, &self.config))
    }

    fn show_preview(&mut self, cell: Vec3) {
        match self.preview {
            Some(handle) => self.renderer.set_position(handle, cell),
            None => {
                let kind = PlaceholderKind::PlacementPreview { size: self.config.cube_size };
                self.preview = Some(self.renderer.create_placeholder(kind, cell));
            }
        }
        if let Some(handle) = self.preview {
            self.renderer.set_visible(handle, true);
        }
    }

    fn hide_preview(&mut self) {
        if let Some(handle) = self.preview {
            self.renderer.set_visible(handle, false);
        }
    }

    fn place_cube(&mut self, ray: &Ray) -> PointerOutcome {
        let Some(cell) = self.target_cell(ray) else {
            return PointerOutcome::Ignored;
        };
        match self.scene.place_cube(&mut self.renderer, cell) {
            Ok(id) => {
                self.hide_preview();
                PointerOutcome::CubePlaced(id)
            }
            Err(err) => {
                log::debug!("Placement ignored: {}", err);
                PointerOutcome::Ignored
            }
        }
    }

    fn remove_cube(&mut self, ray: &Ray) -> PointerOutcome {
        match self.cube_under(ray) {
            Some(id) => {
                self.scene.remove_cube(&mut self.renderer, id);
                PointerOutcome::CubeRemoved(id)
            }
            None => PointerOutcome::Ignored,
        }
    }

    fn cube_under(&self, ray: &Ray) -> Option<CubeId> {
        let registry = &self.scene.registry;
        let hit = self.renderer.intersect(ray, &registry.handles())?;
        registry.get_by_handle(hit).map(|c| c.id())
    }

    /// Hinge markers first, then control cones, then cubes
    fn hinge_click(&mut self, ray: &Ray) -> Result<PointerOutcome> {
        if let Some(id) = self.scene.hinges.intersect_markers(&self.renderer, ray) {
            return match self.scene.hinges.select_hinge(&mut self.renderer, id) {
                Ok(HingeToggle::Selected) => Ok(PointerOutcome::HingeSelected(id)),
                Ok(HingeToggle::Deselected) => Ok(PointerOutcome::HingeDeselected(id)),
                Err(err) => {
                    log::warn!("Hinge {} not selected: {}", id, err);
                    Err(err)
                }
            };
        }
        if let Some(outcome) = self.affordance_click(ray) {
            return Ok(outcome);
        }
        self.cube_click(ray)
    }

    fn affordance_click(&mut self, ray: &Ray) -> Option<PointerOutcome> {
        let index = self.scene.affordances.intersect(&self.renderer, ray)?;
        self.scene.affordances.activate(&mut self.renderer, index);
        Some(PointerOutcome::AffordanceActivated(index))
    }

    /// Shared cube selection rule of hinge and demo mode
    fn cube_click(&mut self, ray: &Ray) -> Result<PointerOutcome> {
        let Some(id) = self.cube_under(ray) else {
            return Ok(PointerOutcome::Ignored);
        };
        let render = &mut self.renderer;
        let scene = &mut self.scene;

        if scene.selection.contains(id) {
            scene.deselect_cube(render, id);
            scene.affordances.clear(render);
            return Ok(PointerOutcome::CubeDeselected(id));
        }

        if scene.selection.is_full() {
            scene.clear_selection(render);
            return Ok(PointerOutcome::SelectionCleared);
        }

        if self.mode == EditorMode::Hinge {
            if let [first] = scene.selection.ids() {
                let first = *first;
                let adjacent = match (scene.registry.get_by_id(first), scene.registry.get_by_id(id)) {
                    (Some(a), Some(b)) => scene.hinges.are_adjacent(a, b),
                    _ => false,
                };
                if !adjacent {
                    log::warn!("Cube {} is not adjacent to {}", id, first);
                    return Err(Error::NonAdjacentSelection { selected: first, candidate: id });
                }
            }
        }

        scene.select_cube(render, id);
        match (self.mode, scene.selection.pair()) {
            (EditorMode::Hinge, Some((a, b))) => {
                scene.affordances.clear(render);
                scene.ensure_hinges(render, a, b);
            }
            _ => {
                if let Some(cube) = scene.registry.get_by_id(id) {
                    scene.affordances.show_for(render, cube);
                }
            }
        }
        Ok(PointerOutcome::CubeSelected(id))
    }

    /// Current scene as a document
    pub fn snapshot(&self) -> SceneDocument {
        let mut doc = persistence::snapshot(&self.scene);
        doc.hinges = self.hinge_data.clone();
        doc
    }

    pub fn hinge_data(&self) -> &[serde_json::Value] {
        &self.hinge_data
    }

    /// Replace the external hinge data and write it into the stored scene.
    ///
    /// `Ok(false)` when nothing is stored yet; the data still rides along
    /// with the next save.
    pub fn update_hinges(&mut self, hinges: Vec<serde_json::Value>) -> Result<bool> {
        self.hinge_data = hinges.clone();
        self.persistence.update_hinges(hinges)
    }

    /// Save the current scene, surfacing storage errors
    pub fn save(&mut self) -> Result<()> {
        let doc = self.snapshot();
        self.persistence.save(&doc)
    }

    /// Save the current scene, logging storage errors
    pub fn auto_save(&mut self) -> bool {
        let doc = self.snapshot();
        self.persistence.auto_save(&doc)
    }

    /// Restore the stored scene. `Ok(false)` when nothing is stored.
    ///
    /// A stored document that does not parse leaves the live scene untouched.
    pub fn load_saved(&mut self) -> Result<bool> {
        match self.persistence.load(None)? {
            Some(doc) => {
                self.restore(&doc);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the live scene with a document
    pub fn restore(&mut self, doc: &SceneDocument) -> RestoreReport {
        self.hide_preview();
        let report = persistence::restore(&mut self.scene, &mut self.renderer, &self.config, doc);
        self.hinge_data = doc.hinges.clone();
        self.sync_affordances();
        report
    }

    /// Parse and restore an imported document, then persist it
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<RestoreReport> {
        let doc = SceneDocument::from_bytes(bytes)?;
        let report = self.restore(&doc);
        self.auto_save();
        Ok(report)
    }

    /// Current scene as an indented document
    pub fn export_bytes(&self) -> Result<Vec<u8>> {
        self.snapshot().to_pretty_bytes()
    }

    /// Remove every cube, marker and selection. Storage is not touched.
    pub fn clear_scene(&mut self) {
        self.scene.clear(&mut self.renderer);
        self.hide_preview();
        self.hinge_data.clear();
        log::info!("Scene cleared");
    }
}
