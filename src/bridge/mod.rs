//! Import/export of scene documents as files
//!
//! Export writes an indented document through a [`FileAdapter`]; import
//! reads one asynchronously and hands it to [`Editor::import_bytes`].

pub mod adapter;

pub use adapter::{FileAdapter, FsFileAdapter};

use std::path::Path;

use crate::core::types::Result;
use crate::editor::Editor;
use crate::persistence::{KeyValueStore, RestoreReport};
use crate::render::RenderBackend;

/// Download name used when the caller has none
pub const DEFAULT_EXPORT_NAME: &str = "scene.json";

/// Export the current scene. Failures are logged and reported as `false`.
pub fn export_scene<R, S, F>(editor: &Editor<R, S>, adapter: &F, filename: &str) -> bool
where
    R: RenderBackend,
    S: KeyValueStore,
    F: FileAdapter,
{
    let bytes = match editor.export_bytes() {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("Failed to serialize scene: {}", err);
            return false;
        }
    };
    match adapter.trigger_download(&bytes, filename) {
        Ok(path) => {
            log::info!("Exported {} cubes to {}", editor.scene().registry().len(), path.display());
            true
        }
        Err(err) => {
            log::error!("Failed to export scene to {}: {}", filename, err);
            false
        }
    }
}

/// Read a document file and replace the live scene with it.
///
/// The live scene is only touched once the whole document parsed.
pub async fn import_scene<R, S, F>(editor: &mut Editor<R, S>, adapter: &F, path: &Path) -> Result<RestoreReport>
where
    R: RenderBackend,
    S: KeyValueStore,
    F: FileAdapter,
{
    let text = adapter.read_as_text(path).await?;
    let report = editor.import_bytes(text.as_bytes())?;
    log::info!("Imported scene from {}", path.display());
    Ok(report)
}
