//! Interaction modes and the editor state machine

pub mod mode;
pub mod pointer;
pub mod session;

pub use mode::EditorMode;
pub use pointer::{PointerEvent, PointerOutcome};
pub use session::Editor;
