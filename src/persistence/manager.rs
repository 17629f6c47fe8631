//! Saving and loading scene documents through a key-value store

use crate::core::types::Result;
use super::document::SceneDocument;
use super::store::KeyValueStore;

/// Scene documents stored under one fixed key. Last save wins.
#[derive(Debug)]
pub struct ScenePersistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ScenePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Overwrite the stored document
    pub fn save(&mut self, doc: &SceneDocument) -> Result<()> {
        let bytes = doc.to_bytes()?;
        self.store.set_item(&self.key, &bytes)?;
        log::debug!("Saved scene ({} cubes, {} bytes)", doc.cubes.len(), bytes.len());
        Ok(())
    }

    /// Save, logging instead of failing. Used after every editing action.
    pub fn auto_save(&mut self, doc: &SceneDocument) -> bool {
        match self.save(doc) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Auto-save failed: {}", err);
                false
            }
        }
    }

    /// The imported document if given, otherwise the stored one.
    ///
    /// `Ok(None)` when nothing is stored; `MalformedDocument` when the stored
    /// bytes do not parse.
    pub fn load(&self, imported: Option<SceneDocument>) -> Result<Option<SceneDocument>> {
        if let Some(doc) = imported {
            return Ok(Some(doc));
        }
        match self.store.get_item(&self.key)? {
            Some(bytes) => Ok(Some(SceneDocument::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Replace the hinge data of the stored document, keeping everything else.
    ///
    /// `Ok(false)` when nothing is stored yet.
    pub fn update_hinges(&mut self, hinges: Vec<serde_json::Value>) -> Result<bool> {
        let Some(mut doc) = self.load(None)? else {
            return Ok(false);
        };
        doc.hinges = hinges;
        self.save(&doc)?;
        Ok(true)
    }

    /// Hinge data of the stored document. Empty when nothing is stored or the
    /// stored bytes cannot be read.
    pub fn hinge_data(&self) -> Vec<serde_json::Value> {
        match self.load(None) {
            Ok(Some(doc)) => doc.hinges,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Hinge data not loaded: {}", err);
                Vec::new()
            }
        }
    }

    pub fn has_saved_state(&self) -> bool {
        matches!(self.store.get_item(&self.key), Ok(Some(_)))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
