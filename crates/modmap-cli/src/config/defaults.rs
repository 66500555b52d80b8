use std::path::PathBuf;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "modmap.config.json";

/// Prefix of configuration environment variables (`MODMAP_ROOT`, ...).
pub const ENV_PREFIX: &str = "MODMAP_";

pub fn default_exclude() -> String {
    modmap_graph::DEFAULT_EXCLUDE.to_string()
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_true() -> bool {
    true
}
