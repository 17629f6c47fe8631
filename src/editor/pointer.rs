//! Pointer events fed to the editor and what they did

use crate::core::input::PointerButton;
use crate::core::types::{CubeId, HingeId};
use crate::math::Ray;

/// A pointer press resolved to a world-space ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub ray: Ray,
    pub button: PointerButton,
    /// Precision modifier held. Presses without it belong to the camera controls.
    pub precision: bool,
}

impl PointerEvent {
    pub fn primary(ray: Ray) -> Self {
        Self { ray, button: PointerButton::Primary, precision: true }
    }

    pub fn secondary(ray: Ray) -> Self {
        Self { ray, button: PointerButton::Secondary, precision: true }
    }
}

/// Effect of a pointer press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing qualifying was hit or the event was not for the editor
    Ignored,
    CubePlaced(CubeId),
    CubeRemoved(CubeId),
    CubeSelected(CubeId),
    CubeDeselected(CubeId),
    /// A click with a full selection cleared it
    SelectionCleared,
    HingeSelected(HingeId),
    HingeDeselected(HingeId),
    AffordanceActivated(usize),
}

impl PointerOutcome {
    /// Whether scene state changed and should be persisted
    pub fn is_mutation(&self) -> bool {
        !matches!(self, PointerOutcome::Ignored | PointerOutcome::AffordanceActivated(_))
    }
}
