//! Filesystem collaborator behind the `/files` routes.
//!
//! # Responsibilities
//! - Create the serving root at startup
//! - Read and write files by relative name under the root
//! - Refuse names that would escape the root

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from the file store.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Name is empty, contains a path separator, or is a `..` component.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// File access rooted at a configured directory. Names are plain file
/// names, never paths; traversal out of the root is rejected up front.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Read the named file's contents.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileStoreError> {
        let path = self.resolve(name)?;
        Ok(tokio::fs::read(path).await?)
    }

    /// Write `contents` to the named file, replacing it if present.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileStoreError> {
        let path = self.resolve(name)?;
        Ok(tokio::fs::write(path, contents).await?)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FileStoreError> {
        if name.is_empty() || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(FileStoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}
