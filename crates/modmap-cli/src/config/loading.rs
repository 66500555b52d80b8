use crate::cli::AnalyzeArgs;
use crate::config::{CONFIG_FILE_NAME, ENV_PREFIX, ModmapConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Values set by one layer above the config file (environment or command
/// line). Unset values stay out of the merge so they don't clobber lower
/// layers.
///
/// Serializes with the config file's camelCase names; deserializes from the
/// snake_case keys figment derives from `MODMAP_*` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename(serialize = "outDir"), skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    #[serde(
        rename(serialize = "includeTypeImports"),
        skip_serializing_if = "Option::is_none"
    )]
    pub include_type_imports: Option<bool>,
}

impl CliOverrides {
    /// Read `<prefix>ROOT`, `<prefix>OUT_DIR`, ... from the environment.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Figment::from(Env::prefixed(prefix))
            .extract()
            .map_err(|e| ConfigError::from(e).into())
    }
}

impl From<&AnalyzeArgs> for CliOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            root: args.root.clone(),
            exclude: args.exclude.clone(),
            out_dir: args.out_dir.clone(),
            json: args.no_json.then_some(false),
            html: args.no_html.then_some(false),
            include_type_imports: args.include_type_imports.then_some(true),
        }
    }
}

impl ModmapConfig {
    /// Load configuration for `modmap analyze`.
    ///
    /// Uses `--config` when given, otherwise `modmap.config.json` in the
    /// working directory if it exists.
    pub fn load(args: &AnalyzeArgs) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.is_file().then(|| default_path.to_path_buf())
            }
        };

        Self::load_from(&CliOverrides::from(args), config_file.as_deref())
    }

    /// Merge defaults, `config_file`, `MODMAP_*` variables and `overrides`.
    pub fn load_from(overrides: &CliOverrides, config_file: Option<&Path>) -> Result<Self> {
        Self::load_layers(overrides, config_file, ENV_PREFIX)
    }

    pub(crate) fn load_layers(
        overrides: &CliOverrides,
        config_file: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        let env = CliOverrides::from_env(env_prefix)?;
        figment = figment
            .merge(Serialized::defaults(&env))
            .merge(Serialized::defaults(overrides));

        figment
            .extract()
            .map_err(|e| ConfigError::from(e).into())
    }
}
