//! Source loading and normalization.
//!
//! Turns a [`FileDescriptor`] into a [`ModuleFile`]: reads the text through a
//! [`Runtime`], fingerprints it and decides which syntax dialect the parser
//! should expect. oxc understands TypeScript and JSX directly, so
//! normalization records the dialect instead of rewriting the text.

use std::fmt;
use std::hash::Hasher;
use std::path::PathBuf;

use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::runtime::{Runtime, RuntimeError};
use crate::walker::FileDescriptor;

/// Maximum file size in bytes (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Errors raised while loading one file. Always scoped to that file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("file '{}' is too large ({size} bytes, max {max})", path.display())]
    TooLarge { path: PathBuf, size: usize, max: usize },

    #[error("file '{}' is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },
}

/// Syntax dialect of a script file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl SourceKind {
    /// Dialect for a file extension (without the dot), `None` for non-script files.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "cjs" | "mjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            _ => None,
        }
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    /// Parser configuration for this dialect. Every file is parsed as an ES
    /// module; plain JavaScript also accepts JSX.
    pub fn source_type(&self) -> SourceType {
        match self {
            Self::TypeScript => SourceType::ts(),
            Self::Tsx => SourceType::tsx(),
            Self::JavaScript | Self::Jsx => SourceType::jsx(),
        }
    }
}

/// Fast non-cryptographic content hash used for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of(contents: &[u8]) -> Self {
        let mut hasher = seahash::SeaHasher::new();
        hasher.write(contents);
        Self(hasher.finish())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        u64::from_str_radix(&value, 16).map(Self)
    }
}

/// One loaded, parseable source file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    pub descriptor: FileDescriptor,
    pub text: String,
    pub kind: SourceKind,
    /// The file carries an `@flow` pragma.
    ///
    /// Informational only. Flow type syntax is not supported and such files
    /// fail to parse like any other syntax error.
    pub is_flow: bool,
    pub fingerprint: Fingerprint,
}

impl ModuleFile {
    /// Build a module file from text already in memory.
    ///
    /// Returns `None` when the descriptor's extension is not a script type.
    pub fn from_text(descriptor: FileDescriptor, text: impl Into<String>) -> Option<Self> {
        let kind = SourceKind::from_extension(&descriptor.extension)?;
        let text = text.into();
        Some(Self {
            fingerprint: Fingerprint::of(text.as_bytes()),
            is_flow: text.contains("@flow"),
            descriptor,
            text,
            kind,
        })
    }
}

/// Load and normalize one file.
///
/// `Ok(None)` means the file is not a recognized script type and should be
/// left out of the analysis entirely.
pub async fn load_module_source(
    descriptor: FileDescriptor,
    runtime: &dyn Runtime,
) -> Result<Option<ModuleFile>, SourceError> {
    if SourceKind::from_extension(&descriptor.extension).is_none() {
        info!(
            "{} not parsed, due to not having a JS or TS extension",
            descriptor.relative_path
        );
        return Ok(None);
    }

    let path = descriptor.full_path.clone();

    if let Ok(metadata) = runtime.metadata(&path).await {
        if metadata.size > MAX_FILE_SIZE as u64 {
            return Err(SourceError::TooLarge {
                path,
                size: metadata.size as usize,
                max: MAX_FILE_SIZE,
            });
        }
    }

    let bytes = runtime
        .read_file(&path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;

    if bytes.len() > MAX_FILE_SIZE {
        return Err(SourceError::TooLarge {
            path,
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let text = String::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8 { path })?;
    let file = ModuleFile::from_text(descriptor, text);

    if let Some(file) = &file {
        debug!(
            flow = file.is_flow,
            typescript = file.kind.is_typescript(),
            fingerprint = %file.fingerprint,
            "Loaded {}",
            file.descriptor.relative_path
        );
    }

    Ok(file)
}
