//! Native Runtime Implementation
//!
//! Wraps `std::fs` behind the [`Runtime`] trait.

// NativeRuntime is the one place that talks to std::fs
#![allow(clippy::disallowed_methods)]

use std::io::ErrorKind;
use std::path::Path;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, err: std::io::Error) -> RuntimeError {
    if err.kind() == ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("{}: {err}", path.display()))
    }
}

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e))
    }

    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e))?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
