//! Rendering collaborator interface
//!
//! The editor core never touches meshes or materials. It asks a
//! [`RenderBackend`] for opaque placeholder handles and for ray picks over them.

pub mod backend;
pub mod headless;

pub use backend::{PlaceholderHandle, PlaceholderKind, RenderBackend, VisualState};
pub use headless::{HeadlessRenderer, Placeholder};
