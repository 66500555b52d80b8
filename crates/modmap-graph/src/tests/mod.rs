mod pipeline_tests;

use std::path::Path;
use std::sync::Arc;

use crate::test_utils::MemoryRuntime;
use crate::{AnalyzeOptions, BuildOutput, FileDescriptor, ModuleKey, build_from_descriptors};

pub(crate) const ROOT: &str = "/proj";

pub(crate) fn key(s: &str) -> ModuleKey {
    ModuleKey::new(s).unwrap()
}

/// Build a registry from in-memory files, listed in the given discovery order.
pub(crate) async fn build_memory(files: &[(&str, &str)]) -> crate::Result<BuildOutput> {
    build_memory_with(files, &AnalyzeOptions::default()).await
}

pub(crate) async fn build_memory_with(
    files: &[(&str, &str)],
    options: &AnalyzeOptions,
) -> crate::Result<BuildOutput> {
    let root = Path::new(ROOT);
    let mut runtime = MemoryRuntime::new();
    let mut descriptors = Vec::new();
    for (rel, code) in files {
        let full = root.join(rel);
        runtime.insert(full.clone(), code);
        descriptors.push(FileDescriptor::new(root, full).unwrap());
    }
    build_from_descriptors(root, descriptors, options, Arc::new(runtime)).await
}
