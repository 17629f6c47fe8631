//! Key-value storage adapters

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::Error;
use crate::core::types::Result;

/// Byte blobs stored under string keys
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if nothing is stored
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the value under `key`
    fn set_item(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Process-local store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.items.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Directory-backed store, one `<key>.json` file per key
#[derive(Clone, Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

fn unavailable(key: &str, err: io::Error) -> Error {
    Error::StorageUnavailable(format!("{}: {}", key, err))
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| unavailable(key, e))?;
        std::fs::write(self.path_for(key), value).map_err(|e| unavailable(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", b"one").unwrap();
        store.set_item("k", b"two").unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested"));
        assert_eq!(store.get_item("scene_state").unwrap(), None);

        store.set_item("scene_state", b"{}").unwrap();
        assert_eq!(store.get_item("scene_state").unwrap(), Some(b"{}".to_vec()));
        assert!(temp.path().join("nested/scene_state.json").exists());
    }

    #[test]
    fn test_file_store_unwritable() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // base dir is a regular file
        let mut store = FileStore::new(&blocker);
        assert!(matches!(store.set_item("k", b"v"), Err(Error::StorageUnavailable(_))));
    }
}
