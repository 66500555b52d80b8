//! Sequential fan-in of per-file results into one [`Registry`].
//!
//! Extraction and resolution are pure and may run in any order; the
//! aggregator is the only place that mutates shared state and is owned by a
//! single build. Each `record` call applies one file's records entirely or
//! not at all.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::{Edge, ModuleEntry, ModuleKey, Registry};
use crate::extract::ExportRecord;
use crate::resolve::ResolvedImport;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("file '{path}' was already recorded")]
    AlreadyRecorded { path: String },
}

/// Everything the aggregator needs from one analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    /// Identity of the file itself.
    pub key: ModuleKey,
    /// Root-relative path, unique per file.
    pub path: String,
    pub imports: Vec<ResolvedImport>,
    pub exports: Vec<ExportRecord>,
}

#[derive(Debug, Default)]
pub struct RegistryAggregator {
    entries: IndexMap<ModuleKey, ModuleEntry>,
    links: Vec<Edge>,
    recorded: FxHashSet<String>,
}

impl RegistryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one file's imports and exports.
    ///
    /// The file's own identity is registered first, then every import adds
    /// its importer to the target's symbol slot (once per symbol) and one edge.
    pub fn record(&mut self, file: &FileAnalysis) -> Result<(), AggregateError> {
        if self.recorded.contains(&file.path) {
            return Err(AggregateError::AlreadyRecorded {
                path: file.path.clone(),
            });
        }
        self.recorded.insert(file.path.clone());

        let own = self.entry_mut(&file.key, true);
        own.exports.extend(file.exports.iter().cloned());

        for import in &file.imports {
            let symbol = import.symbol();
            let target = self.entry_mut(&import.target, import.is_relative);

            match target.symbols.get_mut(symbol) {
                Some(importers) => {
                    if !importers.contains(&file.key) {
                        importers.push(file.key.clone());
                    }
                }
                None => {
                    trace!("New slot '{}' on {}", symbol, import.target);
                    target
                        .symbols
                        .insert(symbol.to_string(), vec![file.key.clone()]);
                }
            }

            self.links
                .push(Edge::new(import.target.clone(), symbol, file.key.clone()));
        }

        Ok(())
    }

    pub fn recorded_files(&self) -> usize {
        self.recorded.len()
    }

    /// Finish the build.
    pub fn snapshot(self) -> Registry {
        debug!(
            "Registry complete: {} entries, {} links",
            self.entries.len(),
            self.links.len()
        );
        Registry::from_parts(self.entries, self.links)
    }

    fn entry_mut(&mut self, key: &ModuleKey, is_relative: bool) -> &mut ModuleEntry {
        if !self.entries.contains_key(key) {
            debug!(relative = is_relative, "Registering module {}", key);
        }
        self.entries
            .entry(key.clone())
            .or_insert_with(|| ModuleEntry::new(is_relative))
    }
}
