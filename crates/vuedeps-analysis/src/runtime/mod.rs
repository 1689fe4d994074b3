//! Filesystem abstraction for the parser and resolver.
//!
//! Every read and stat the engine performs goes through [`Runtime`], so the
//! engine can run against the real filesystem ([`NativeRuntime`]) or an
//! in-memory tree in tests.

mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use native::NativeRuntime;

use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Blocking filesystem operations used by the engine.
///
/// Implementations must be shareable across the threads that parse files in
/// parallel.
pub trait Runtime: Send + Sync + Debug {
    /// Read a file's bytes.
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Stat a path.
    fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| RuntimeError::InvalidUtf8(path.to_path_buf()))
    }

    /// Whether the path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file).unwrap_or(false)
    }

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir).unwrap_or(false)
    }
}
