//! Source tree traversal.
//!
//! Produces the flat, ordered list of [`FileDescriptor`]s the builder consumes.
//! Discovery order is deterministic (entries sorted by file name at every
//! directory level) because aggregation order, and therefore edge order in the
//! final registry, follows it.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default exclusion pattern applied to root-relative paths.
pub const DEFAULT_EXCLUDE: &str = "test|node_modules|dist|fixtures|spec|snap";

/// Errors that abort traversal as a whole.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The analysis root could not be read at all.
    #[error("failed to read analysis root '{}': {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The analysis root could not be made absolute.
    #[error("cannot resolve analysis root '{}': {source}", path.display())]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analysis root exists but is not a directory.
    #[error("analysis root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A file path handed to the descriptor constructor lies outside the root.
    #[error("path '{}' is not inside root '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// The exclusion pattern is not a valid regular expression.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Location facts about one discovered file.
///
/// Relative paths always use `/` separators and never start with one; a file
/// directly under the root has an empty `relative_directory`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileDescriptor {
    pub full_path: PathBuf,
    pub relative_path: String,
    pub file_name: String,
    pub file_name_without_ext: String,
    pub directory: PathBuf,
    pub relative_directory: String,
    /// Extension without the leading dot, empty when the file has none.
    pub extension: String,
}

impl FileDescriptor {
    /// Describe `full_path` relative to `root`. Purely lexical.
    pub fn new(root: &Path, full_path: impl Into<PathBuf>) -> Result<Self, WalkError> {
        let full_path = full_path.into();
        let relative = full_path
            .strip_prefix(root)
            .map_err(|_| WalkError::OutsideRoot {
                path: full_path.clone(),
                root: root.to_path_buf(),
            })?;

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let relative_path = segments.join("/");
        let relative_directory = match segments.split_last() {
            Some((_, dirs)) => dirs.join("/"),
            None => String::new(),
        };

        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = full_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name_without_ext = full_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        let directory = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        Ok(Self {
            full_path,
            relative_path,
            file_name,
            file_name_without_ext,
            directory,
            relative_directory,
            extension,
        })
    }

    /// Root-relative path with the extension removed.
    pub fn relative_path_without_ext(&self) -> String {
        if self.relative_directory.is_empty() {
            self.file_name_without_ext.clone()
        } else {
            format!("{}/{}", self.relative_directory, self.file_name_without_ext)
        }
    }
}

/// Traversal options.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Entries whose root-relative path matches are skipped (directories are
    /// pruned with everything below them).
    pub exclude: Option<Regex>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude: Regex::new(DEFAULT_EXCLUDE).ok(),
        }
    }
}

impl WalkOptions {
    /// Options with a custom exclusion pattern. An empty pattern disables exclusion.
    pub fn with_exclude(pattern: &str) -> Result<Self, WalkError> {
        let exclude = if pattern.is_empty() {
            None
        } else {
            Some(
                Regex::new(pattern).map_err(|source| WalkError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?,
            )
        };
        Ok(Self { exclude })
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let Some(pattern) = &self.exclude else {
            return false;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        pattern.is_match(&relative)
    }
}

/// Absolute, lexically cleaned form of `root` (`.` and `..` segments
/// collapsed), so identities do not depend on how the root was typed.
pub fn absolute_root(root: &Path) -> Result<PathBuf, WalkError> {
    std::path::absolute(root)
        .map(|path| path.clean())
        .map_err(|source| WalkError::Unresolvable {
            path: root.to_path_buf(),
            source,
        })
}

/// List every file under `root` in deterministic discovery order.
///
/// Unreadable entries below the root are logged and skipped; only an
/// unreadable root fails the walk.
pub fn list_files(root: &Path, options: &WalkOptions) -> Result<Vec<FileDescriptor>, WalkError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .path()
                    .strip_prefix(root)
                    .map(|rel| !options.is_excluded(rel))
                    .unwrap_or(true)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(WalkError::Root {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(WalkError::NotADirectory(root.to_path_buf()));
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        files.push(FileDescriptor::new(root, entry.into_path())?);
    }

    debug!("Discovered {} file(s) under {}", files.len(), root.display());
    Ok(files)
}
