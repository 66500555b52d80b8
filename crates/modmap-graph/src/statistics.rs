use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// Counters describing one build, for summaries and logging.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatistics {
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub module_count: usize,
    pub local_module_count: usize,
    pub external_dependency_count: usize,
    pub symbol_count: usize,
    pub edge_count: usize,
    pub unused_export_count: usize,
}

impl BuildStatistics {
    pub fn from_registry(registry: &Registry, files_analyzed: usize, files_failed: usize) -> Self {
        let external_dependency_count = registry.external_dependencies().count();
        Self {
            files_analyzed,
            files_failed,
            module_count: registry.len(),
            local_module_count: registry.len() - external_dependency_count,
            external_dependency_count,
            symbol_count: registry.symbol_count(),
            edge_count: registry.links().len(),
            unused_export_count: registry.unused_exports().len(),
        }
    }
}
