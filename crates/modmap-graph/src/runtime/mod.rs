//! File access abstraction for source loading.
//!
//! The builder never touches the filesystem directly. Loading goes through the
//! `Runtime` trait so tests can feed an in-memory tree and the CLI can use the
//! native filesystem.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
}

/// Platform runtime trait
///
/// Implementations provide read access to the analyzed tree. Methods are async
/// so that loading many files can overlap on a tokio runtime.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's raw bytes
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;
}
