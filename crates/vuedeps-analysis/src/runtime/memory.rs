//! In-memory runtime for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Runtime backed by a map of absolute paths to contents.
///
/// Directories are implied by the ancestors of inserted files.
#[derive(Debug, Default, Clone)]
pub struct MemoryRuntime {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    fn is_implied_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        if let Some(content) = self.files.get(path) {
            return Ok(FileMetadata {
                size: content.len() as u64,
                is_dir: false,
                is_file: true,
            });
        }
        if self.is_implied_dir(path) {
            return Ok(FileMetadata {
                size: 0,
                is_dir: true,
                is_file: false,
            });
        }
        Err(RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_implied_dir(path)
    }
}
