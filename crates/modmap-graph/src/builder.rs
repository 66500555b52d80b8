//! Build orchestration.
//!
//! Every file goes through parse, extract and resolve independently on the
//! rayon pool. Results are kept in discovery order and folded into a
//! [`RegistryAggregator`] on the calling thread, so completion order never
//! affects the registry.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extract::{ExtractOptions, parse_and_extract};
use crate::registry::aggregator::{FileAnalysis, RegistryAggregator};
use crate::registry::{ModuleKey, Registry};
use crate::resolve::{module_key_for_file, resolve_imports};
use crate::source::ModuleFile;
use crate::statistics::BuildStatistics;

/// Why a file was left out of the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "message", rename_all = "camelCase")]
pub enum FailureReason {
    #[error("load failed: {0}")]
    Load(String),
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("resolution failed: {0}")]
    Resolve(String),
    #[error("aggregation failed: {0}")]
    Aggregate(String),
}

/// A file excluded from the registry, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    /// Root-relative path.
    pub path: String,
    /// The file's identity, when it got far enough to have one.
    pub key: Option<ModuleKey>,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub extract: ExtractOptions,
}

/// Registry plus everything that did not make it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub registry: Registry,
    pub failures: Vec<FileFailure>,
    pub stats: BuildStatistics,
}

impl BuildOutput {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    base_path: String,
    options: BuildOptions,
}

impl RegistryBuilder {
    /// `base_path` is the analysis root as written in specifiers that spell
    /// it out literally.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse, extract and resolve one file. Pure; safe to run on any thread.
    pub fn analyze_file(&self, file: &ModuleFile) -> Result<FileAnalysis, FileFailure> {
        let path = file.descriptor.relative_path.clone();
        let fail = |key: Option<ModuleKey>, reason| FileFailure {
            path: path.clone(),
            key,
            reason,
        };

        let key = module_key_for_file(&file.descriptor)
            .map_err(|e| fail(None, FailureReason::Resolve(e.to_string())))?;

        let declarations = parse_and_extract(file, &self.options.extract)
            .map_err(|e| fail(Some(key.clone()), FailureReason::Parse(e.to_string())))?;

        let imports = resolve_imports(
            &declarations.imports,
            &file.descriptor.relative_directory,
            &self.base_path,
        )
        .map_err(|e| fail(Some(key.clone()), FailureReason::Resolve(e.to_string())))?;

        info!(
            imports = imports.len(),
            exports = declarations.exports.len(),
            "Parsed {}",
            path
        );

        Ok(FileAnalysis {
            key,
            path,
            imports,
            exports: declarations.exports,
        })
    }

    /// Build the registry for `files`, which must be in discovery order.
    pub fn build(&self, files: Vec<ModuleFile>) -> BuildOutput {
        self.build_with_failures(files, Vec::new())
    }

    /// Like [`build`](Self::build), carrying failures from earlier stages
    /// (loading) into the output.
    pub fn build_with_failures(
        &self,
        files: Vec<ModuleFile>,
        mut failures: Vec<FileFailure>,
    ) -> BuildOutput {
        debug!("Analyzing {} file(s)", files.len());

        let results: Vec<Result<FileAnalysis, FileFailure>> =
            files.par_iter().map(|file| self.analyze_file(file)).collect();

        let mut aggregator = RegistryAggregator::new();
        for result in results {
            let outcome = result.and_then(|analysis| {
                aggregator.record(&analysis).map_err(|e| FileFailure {
                    path: analysis.path.clone(),
                    key: Some(analysis.key.clone()),
                    reason: FailureReason::Aggregate(e.to_string()),
                })
            });

            if let Err(failure) = outcome {
                warn!("Skipping {}: {}", failure.path, failure.reason);
                failures.push(failure);
            }
        }

        let analyzed = aggregator.recorded_files();
        let registry = aggregator.snapshot();
        let stats = BuildStatistics::from_registry(&registry, analyzed, failures.len());

        BuildOutput {
            registry,
            failures,
            stats,
        }
    }
}
