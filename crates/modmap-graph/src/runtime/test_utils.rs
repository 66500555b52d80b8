//! In-memory runtime for tests.
//!
//! `MemoryRuntime` holds a map of absolute path to file contents. It lets the
//! builder and loader be exercised without touching the disk.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Runtime serving files from memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryRuntime {
    files: FxHashMap<PathBuf, Vec<u8>>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) {
        self.files.insert(path.into(), contents.as_ref().to_vec());
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        self.files
            .get(path)
            .map(|contents| FileMetadata {
                size: contents.len() as u64,
            })
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }
}
