//! Specifier resolution.
//!
//! Maps a raw import specifier to the canonical module identity used as a
//! registry key. Resolution is lexical: no filesystem probing, no alias or
//! package lookup. Relative specifiers are joined against the importer's
//! directory; everything else is kept verbatim.

use std::path::Path;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::ImportRecord;
use crate::registry::ModuleKey;
use crate::walker::FileDescriptor;

/// Extensions stripped from identities.
pub const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "cjs", "mjs"];

/// File stem that stands for its enclosing directory.
pub const INDEX_SEGMENT: &str = "index";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("specifier '{specifier}' resolves to an empty module identity")]
    EmptyIdentity { specifier: String },
}

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub key: ModuleKey,
    pub is_relative: bool,
}

/// An import record together with the identity it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImport {
    pub record: ImportRecord,
    pub target: ModuleKey,
    pub is_relative: bool,
}

impl ResolvedImport {
    pub fn symbol(&self) -> &str {
        self.record.binding.symbol()
    }
}

/// `./` and `../` specifiers are relative; everything else is a package or alias.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Resolve `raw`, written in a file whose root-relative directory is
/// `importer_dir`, to its canonical identity.
///
/// `base_path` is the analysis root as an absolute path string. A specifier
/// that spells it out as a leading path prefix has it removed before anything
/// else happens; relative base paths are ignored.
pub fn resolve_specifier(
    raw: &str,
    importer_dir: &str,
    base_path: &str,
) -> Result<Resolution, ResolveError> {
    let empty = || ResolveError::EmptyIdentity {
        specifier: raw.to_string(),
    };

    let mut specifier = strip_base_path(raw, base_path).to_string();

    if specifier == "." {
        specifier = format!("./{INDEX_SEGMENT}");
    }

    if !is_relative_specifier(&specifier) {
        let key = ModuleKey::new(specifier).map_err(|_| empty())?;
        return Ok(Resolution {
            key,
            is_relative: false,
        });
    }

    let joined = join_relative(importer_dir, &specifier);
    let identity = collapse_index(strip_script_extension(&joined));
    let key = ModuleKey::new(identity).map_err(|_| empty())?;

    Ok(Resolution {
        key,
        is_relative: true,
    })
}

/// Resolve every record of one file, stopping at the first failure.
pub fn resolve_imports(
    records: &[ImportRecord],
    importer_dir: &str,
    base_path: &str,
) -> Result<Vec<ResolvedImport>, ResolveError> {
    records
        .iter()
        .map(|record| {
            let resolution = resolve_specifier(&record.specifier, importer_dir, base_path)?;
            Ok(ResolvedImport {
                record: record.clone(),
                target: resolution.key,
                is_relative: resolution.is_relative,
            })
        })
        .collect()
}

/// Identity of a file itself, following the same index rule as specifiers:
/// `dir/index.ts` is `dir`, the root `index.ts` is `index`.
pub fn module_key_for_file(descriptor: &FileDescriptor) -> Result<ModuleKey, ResolveError> {
    let path = descriptor.relative_path_without_ext();
    ModuleKey::new(collapse_index(&path)).map_err(|_| ResolveError::EmptyIdentity {
        specifier: descriptor.relative_path.clone(),
    })
}

/// Remove a leading absolute `base_path` from `raw`. The prefix must end on a
/// path boundary, so `/proj` is not stripped from `/projects/x`.
fn strip_base_path<'a>(raw: &'a str, base_path: &str) -> &'a str {
    if !Path::new(base_path).is_absolute() {
        return raw;
    }
    let base = base_path.trim_end_matches(['/', '\\']);
    match raw.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\', '.']) => rest,
        _ => raw,
    }
}

/// Join a relative specifier onto a root-relative directory and collapse
/// `.`/`..` segments. Always returns `/`-separated paths.
fn join_relative(importer_dir: &str, specifier: &str) -> String {
    let cleaned = Path::new(importer_dir).join(specifier).clean();
    let joined = cleaned.to_string_lossy().replace('\\', "/");
    if joined == "." {
        INDEX_SEGMENT.to_string()
    } else {
        joined
    }
}

/// Drop a trailing `/index` segment. A lone `index` is left as-is.
pub fn collapse_index(path: &str) -> &str {
    path.strip_suffix("/index").unwrap_or(path)
}

/// Drop a recognized script extension from the last path segment.
pub fn strip_script_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let Some(dot) = path[name_start..].rfind('.') else {
        return path;
    };
    // dotfiles like `.eslintrc` have no stem to keep
    if dot == 0 {
        return path;
    }
    let ext = &path[name_start + dot + 1..];
    if SCRIPT_EXTENSIONS.contains(&ext) {
        &path[..name_start + dot]
    } else {
        path
    }
}
