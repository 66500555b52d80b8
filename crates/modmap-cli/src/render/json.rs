use std::fs;
use std::path::{Path, PathBuf};

use modmap_graph::Registry;

use crate::error::{Result, ResultExt};

pub const REGISTRIES_FILE: &str = "registries.json";
pub const LINKS_FILE: &str = "links.json";

/// Write the registry entries and the link list into `out_dir`.
///
/// Returns the written paths.
pub fn write_registry(registry: &Registry, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_path(out_dir)?;

    let registries_path = out_dir.join(REGISTRIES_FILE);
    let registries = serde_json::to_string_pretty(registry.entries())?;
    fs::write(&registries_path, registries).with_path(&registries_path)?;

    let links_path = out_dir.join(LINKS_FILE);
    let links = serde_json::to_string_pretty(registry.links())?;
    fs::write(&links_path, links).with_path(&links_path)?;

    Ok(vec![registries_path, links_path])
}
