//! Input state tracking and translation of window events into editor actions

use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::core::types::Vec2;

/// Mouse button as seen by the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Place / select
    Primary,
    /// Remove
    Secondary,
}

/// Build layer navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerStep {
    Up,
    Down,
}

/// Editor-level action decoded from a window event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    PointerDown {
        button: PointerButton,
        screen: Vec2,
        /// Whether the precision modifier (Control / Command) was held
        precision: bool,
    },
    PointerMove { screen: Vec2 },
    PointerLeave,
    Layer(LayerStep),
}

/// Map a winit mouse button onto an editor button
pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Map a key onto a layer step
pub fn layer_step(key: KeyCode) -> Option<LayerStep> {
    match key {
        KeyCode::ArrowUp => Some(LayerStep::Up),
        KeyCode::ArrowDown => Some(LayerStep::Down),
        _ => None,
    }
}

/// Tracks modifier and cursor state across window events
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier keys
    modifiers: ModifiersState,
    /// Current cursor position in pixels
    cursor_position: Vec2,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, returning the editor action it triggers if any
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_modifiers(modifiers.state());
                None
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
                ..
            } => layer_step(*key_code).map(InputAction::Layer),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = Vec2::new(position.x as f32, position.y as f32);
                Some(InputAction::PointerMove { screen: self.cursor_position })
            }
            WindowEvent::CursorLeft { .. } => Some(InputAction::PointerLeave),
            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
                pointer_button(*button).map(|button| InputAction::PointerDown {
                    button,
                    screen: self.cursor_position,
                    precision: self.precision_held(),
                })
            }
            _ => None,
        }
    }

    /// Overwrite the modifier state
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Whether Control (or Command on macOS) is held
    pub fn precision_held(&self) -> bool {
        self.modifiers.control_key() || self.modifiers.super_key()
    }

    /// Get current cursor position
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(pointer_button(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(pointer_button(MouseButton::Middle), None);
    }

    #[test]
    fn test_layer_keys() {
        assert_eq!(layer_step(KeyCode::ArrowUp), Some(LayerStep::Up));
        assert_eq!(layer_step(KeyCode::ArrowDown), Some(LayerStep::Down));
        assert_eq!(layer_step(KeyCode::KeyW), None);
    }

    #[test]
    fn test_precision_modifier() {
        let mut input = InputState::new();
        assert!(!input.precision_held());

        input.set_modifiers(ModifiersState::CONTROL);
        assert!(input.precision_held());

        input.set_modifiers(ModifiersState::SUPER);
        assert!(input.precision_held());

        input.set_modifiers(ModifiersState::SHIFT);
        assert!(!input.precision_held());
    }

    #[test]
    fn test_modifiers_changed_event() {
        let mut input = InputState::new();
        let event = WindowEvent::ModifiersChanged(ModifiersState::CONTROL.into());
        assert_eq!(input.process_event(&event), None);
        assert!(input.precision_held());
    }
}
