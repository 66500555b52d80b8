//! # modmap-graph
//!
//! Builds a module dependency registry for a JavaScript/TypeScript source
//! tree: one entry per canonical module identity, each listing which symbols
//! are imported from it and by whom, plus one edge per import binding.
//!
//! ## Pipeline
//!
//! ```text
//!   walker::list_files ──► source::load_module_source ──► builder::RegistryBuilder
//!   (sorted descriptors)    (tokio tasks, via Runtime)     │
//!                                                          ├─ extract  (rayon, per file)
//!                                                          ├─ resolve  (rayon, per file)
//!                                                          └─ registry::aggregator (sequential)
//! ```
//!
//! Per-file work is pure and runs in parallel. Aggregation is a single pass
//! in discovery order, so the registry does not depend on scheduling.
//! A file that fails to load, parse or resolve is reported in
//! [`BuildOutput::failures`] and contributes nothing to the registry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modmap_graph::{AnalyzeOptions, analyze};
//! use std::path::Path;
//!
//! # async fn run() -> modmap_graph::Result<()> {
//! let output = analyze(Path::new("./src"), &AnalyzeOptions::default()).await?;
//! for (key, entry) in output.registry.entries() {
//!     println!("{key}: {} imported symbol(s)", entry.symbols.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Identities
//!
//! Relative specifiers are joined against the importer's directory, stripped
//! of script extensions and index-collapsed, so `./widgets`,
//! `./widgets/index` and `./widgets/index.ts` are the same module. Package
//! and alias specifiers are kept verbatim. See [`resolve`].

pub mod builder;
pub mod extract;
pub mod registry;
pub mod resolve;
pub mod runtime;
pub mod source;
pub mod statistics;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

pub use builder::{BuildOptions, BuildOutput, FailureReason, FileFailure, RegistryBuilder};
pub use extract::{
    Declarations, ExportRecord, ExtractError, ExtractOptions, ImportBinding, ImportRecord,
    extract_declarations, parse_and_extract,
};
pub use registry::aggregator::{AggregateError, FileAnalysis, RegistryAggregator};
pub use registry::{Edge, ModuleEntry, ModuleKey, Registry};
pub use resolve::{Resolution, ResolveError, ResolvedImport, module_key_for_file, resolve_specifier};
pub use runtime::native::NativeRuntime;
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use source::{Fingerprint, ModuleFile, SourceError, SourceKind, load_module_source};
pub use statistics::BuildStatistics;
pub use walker::{
    DEFAULT_EXCLUDE, FileDescriptor, WalkError, WalkOptions, absolute_root, list_files,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    pub use super::runtime::test_utils::*;
}

/// Errors that abort a whole analysis run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file set could not be enumerated.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Script files were found but none of them could be loaded.
    #[error("none of the {count} script file(s) under '{}' could be loaded", root.display())]
    NothingLoaded { root: PathBuf, count: usize },

    /// A loader or build task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Options for [`analyze`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub walk: WalkOptions,
    pub build: BuildOptions,
}

/// Walk `root`, load every script file from disk and build the registry.
pub async fn analyze(root: &Path, options: &AnalyzeOptions) -> Result<BuildOutput> {
    analyze_with_runtime(root, options, Arc::new(NativeRuntime::new())).await
}

/// [`analyze`] with file contents served by `runtime`.
///
/// Traversal still reads the directory tree from disk; only file contents go
/// through the runtime. `root` is made absolute first.
pub async fn analyze_with_runtime(
    root: &Path,
    options: &AnalyzeOptions,
    runtime: Arc<dyn Runtime>,
) -> Result<BuildOutput> {
    let root = absolute_root(root)?;
    let descriptors = list_files(&root, &options.walk)?;
    build_from_descriptors(&root, descriptors, options, runtime).await
}

/// Load `descriptors` concurrently and build the registry.
///
/// Descriptors must be in discovery order; the registry follows that order
/// regardless of which load finishes first.
pub async fn build_from_descriptors(
    root: &Path,
    descriptors: Vec<FileDescriptor>,
    options: &AnalyzeOptions,
    runtime: Arc<dyn Runtime>,
) -> Result<BuildOutput> {
    let total = descriptors.len();
    let mut tasks = JoinSet::new();

    for (index, descriptor) in descriptors.into_iter().enumerate() {
        let runtime = Arc::clone(&runtime);
        tasks.spawn(async move {
            let path = descriptor.relative_path.clone();
            let loaded = load_module_source(descriptor, runtime.as_ref()).await;
            (index, path, loaded)
        });
    }

    let mut slots: Vec<Option<std::result::Result<ModuleFile, FileFailure>>> =
        (0..total).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, path, loaded) = joined.map_err(|e| Error::Task(e.to_string()))?;
        slots[index] = match loaded {
            Ok(Some(file)) => Some(Ok(file)),
            Ok(None) => None,
            Err(err) => {
                warn!("Could not load {}: {}", path, err);
                Some(Err(FileFailure {
                    path,
                    key: None,
                    reason: FailureReason::Load(err.to_string()),
                }))
            }
        };
    }

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for slot in slots.into_iter().flatten() {
        match slot {
            Ok(file) => files.push(file),
            Err(failure) => failures.push(failure),
        }
    }

    if files.is_empty() && !failures.is_empty() {
        return Err(Error::NothingLoaded {
            root: root.to_path_buf(),
            count: failures.len(),
        });
    }

    debug!(
        "Loaded {} of {} file(s) under {}",
        files.len(),
        total,
        root.display()
    );

    let builder = RegistryBuilder::new(root.to_string_lossy().into_owned())
        .with_options(options.build);

    tokio::task::spawn_blocking(move || builder.build_with_failures(files, failures))
        .await
        .map_err(|e| Error::Task(e.to_string()))
}

#[cfg(test)]
mod tests;
