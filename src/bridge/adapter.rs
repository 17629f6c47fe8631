//! File access used by import and export

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

/// Host file operations
pub trait FileAdapter {
    /// Read a user-chosen file as text
    fn read_as_text(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;

    /// Hand `bytes` to the user under `filename`, returning where they went
    fn trigger_download(&self, bytes: &[u8], filename: &str) -> io::Result<PathBuf>;
}

/// Reads from the local filesystem and "downloads" into a directory
#[derive(Clone, Debug)]
pub struct FsFileAdapter {
    download_dir: PathBuf,
}

impl FsFileAdapter {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self { download_dir: download_dir.into() }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Target path for a download. Only the final path component of `filename` is used.
    pub fn download_path(&self, filename: &str) -> io::Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid file name {:?}", filename)))?;
        Ok(self.download_dir.join(name))
    }
}

impl FileAdapter for FsFileAdapter {
    async fn read_as_text(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    fn trigger_download(&self, bytes: &[u8], filename: &str) -> io::Result<PathBuf> {
        let path = self.download_path(filename)?;
        std::fs::create_dir_all(&self.download_dir)?;
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_download_path_strips_directories() {
        let adapter = FsFileAdapter::new("/downloads");
        assert_eq!(adapter.download_path("../../etc/scene.json").unwrap(), PathBuf::from("/downloads/scene.json"));
        assert!(adapter.download_path("..").is_err());
    }

    #[tokio::test]
    async fn test_download_and_read_back() {
        let dir = TempDir::new().unwrap();
        let adapter = FsFileAdapter::new(dir.path().join("nested"));

        let path = adapter.trigger_download(b"{}", "scene.json").unwrap();
        assert_eq!(adapter.read_as_text(&path).await.unwrap(), "{}");
    }
}
