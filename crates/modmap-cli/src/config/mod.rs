//! Configuration for modmap with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and
//! `modmap.config.json`. Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use modmap_graph::{AnalyzeOptions, BuildOptions, ExtractOptions, WalkOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

pub use defaults::*;
pub use loading::CliOverrides;

/// modmap configuration, loaded from modmap.config.json, `MODMAP_*`
/// variables and CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModmapConfig {
    /// Directory to analyze
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Regex matched against root-relative paths; matches are skipped.
    /// Empty disables exclusion.
    #[serde(default = "default_exclude")]
    pub exclude: String,

    /// Directory the outputs are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Write registries.json and links.json
    #[serde(default = "default_true")]
    pub json: bool,

    /// Write tree.html
    #[serde(default = "default_true")]
    pub html: bool,

    /// Count type-only imports and exports
    #[serde(default)]
    pub include_type_imports: bool,
}

impl Default for ModmapConfig {
    fn default() -> Self {
        Self {
            root: None,
            exclude: default_exclude(),
            out_dir: default_out_dir(),
            json: true,
            html: true,
            include_type_imports: false,
        }
    }
}

impl ModmapConfig {
    /// Generate JSON Schema for modmap.config.json.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(ModmapConfig);
        Ok(serde_json::to_value(schema)?)
    }

    /// Translate into library options.
    pub fn analyze_options(&self) -> Result<AnalyzeOptions> {
        let walk = WalkOptions::with_exclude(&self.exclude).map_err(|e| {
            ConfigError::InvalidValue {
                field: "exclude".to_string(),
                value: self.exclude.clone(),
                hint: e.to_string(),
            }
        })?;

        Ok(AnalyzeOptions {
            walk,
            build: BuildOptions {
                extract: ExtractOptions {
                    include_type_imports: self.include_type_imports,
                },
            },
        })
    }
}
