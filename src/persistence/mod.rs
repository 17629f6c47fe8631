//! Scene persistence: document schema, storage adapters, snapshot and restore

pub mod document;
pub mod manager;
pub mod snapshot;
pub mod store;

pub use document::{CubeRecord, HingeRecord, Position, SceneDocument};
pub use manager::ScenePersistence;
pub use snapshot::{restore, snapshot, RestoreReport};
pub use store::{FileStore, KeyValueStore, MemoryStore};
