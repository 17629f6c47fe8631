//! Grid cube registry
//!
//! Sole owner of placed cubes. Other components refer to cubes by id and
//! position only.

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::{CubeId, Result, Vec3};
use crate::render::{PlaceholderHandle, PlaceholderKind, RenderBackend, VisualState};
use super::grid::CellKey;

/// A placed unit block
#[derive(Clone, Debug, PartialEq)]
pub struct Cube {
    id: CubeId,
    position: Vec3,
    handle: PlaceholderHandle,
}

impl Cube {
    pub fn id(&self) -> CubeId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn handle(&self) -> PlaceholderHandle {
        self.handle
    }
}

/// Cubes keyed by grid cell, iterated in insertion order
#[derive(Debug)]
pub struct CubeRegistry {
    cubes: Vec<Cube>,
    by_cell: HashMap<CellKey, CubeId>,
    cube_size: f32,
    grid_pitch: f32,
}

impl CubeRegistry {
    pub fn new(cube_size: f32, grid_pitch: f32) -> Self {
        Self {
            cubes: Vec::new(),
            by_cell: HashMap::new(),
            cube_size,
            grid_pitch,
        }
    }

    /// Occupancy key of the cell containing `position`
    pub fn cell_of(&self, position: Vec3) -> CellKey {
        CellKey::from_position(position, self.grid_pitch)
    }

    /// Create a cube with a fresh id
    pub fn create(&mut self, render: &mut dyn RenderBackend, position: Vec3) -> Result<&Cube> {
        self.create_with_id(render, CubeId::new(), position)
    }

    /// Create a cube keeping a known id (restores)
    pub fn create_with_id(
        &mut self,
        render: &mut dyn RenderBackend,
        id: CubeId,
        position: Vec3,
    ) -> Result<&Cube> {
        let cell = self.cell_of(position);
        if let Some(&occupant) = self.by_cell.get(&cell) {
            return Err(Error::OccupiedCell { position, occupant });
        }
        if self.get_by_id(id).is_some() {
            return Err(Error::MalformedDocument(format!("duplicate cube id {}", id)));
        }

        let handle = render.create_placeholder(PlaceholderKind::Cube { size: self.cube_size }, position);
        self.by_cell.insert(cell, id);
        self.cubes.push(Cube { id, position, handle });
        log::debug!("Cube {} created at {}", id, position);

        Ok(&self.cubes[self.cubes.len() - 1])
    }

    /// Remove the cube in `position`'s cell. Absent cells are a no-op.
    pub fn remove_at(&mut self, render: &mut dyn RenderBackend, position: Vec3) -> Option<Cube> {
        let id = *self.by_cell.get(&self.cell_of(position))?;
        self.remove_by_id(render, id)
    }

    /// Remove a cube by id. Unknown ids are a no-op.
    pub fn remove_by_id(&mut self, render: &mut dyn RenderBackend, id: CubeId) -> Option<Cube> {
        let index = self.cubes.iter().position(|c| c.id == id)?;
        let cube = self.cubes.remove(index);
        let cell = self.cell_of(cube.position);
        self.by_cell.remove(&cell);
        render.remove_placeholder(cube.handle);
        log::debug!("Cube {} removed", id);
        Some(cube)
    }

    pub fn get_at(&self, position: Vec3) -> Option<&Cube> {
        let id = self.by_cell.get(&self.cell_of(position))?;
        self.get_by_id(*id)
    }

    pub fn has_cube_at(&self, position: Vec3) -> bool {
        self.by_cell.contains_key(&self.cell_of(position))
    }

    pub fn get_by_id(&self, id: CubeId) -> Option<&Cube> {
        self.cubes.iter().find(|c| c.id == id)
    }

    /// Cube owning a render handle
    pub fn get_by_handle(&self, handle: PlaceholderHandle) -> Option<&Cube> {
        self.cubes.iter().find(|c| c.handle == handle)
    }

    /// All cubes in insertion order
    pub fn all(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn handles(&self) -> Vec<PlaceholderHandle> {
        self.cubes.iter().map(|c| c.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn set_visual(&self, render: &mut dyn RenderBackend, id: CubeId, state: VisualState) {
        if let Some(cube) = self.get_by_id(id) {
            render.set_visual(cube.handle, state);
        }
    }

    /// Remove every cube, returning the removed ids
    pub fn clear(&mut self, render: &mut dyn RenderBackend) -> Vec<CubeId> {
        self.by_cell.clear();
        self.cubes
            .drain(..)
            .map(|cube| {
                render.remove_placeholder(cube.handle);
                cube.id
            })
            .collect()
    }
}
