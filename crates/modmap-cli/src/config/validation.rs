use crate::config::ModmapConfig;
use crate::error::{CliError, ConfigError, Result};

impl ModmapConfig {
    /// Validate configuration before running an analysis.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = &self.root else {
            return Err(ConfigError::MissingField {
                field: "root".to_string(),
                hint: "Pass a directory (`modmap analyze ./src`), set `root` in modmap.config.json or MODMAP_ROOT".to_string(),
            }
            .into());
        };

        if !root.exists() {
            return Err(CliError::FileNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: root.display().to_string(),
                hint: "The analysis root must be a directory".to_string(),
            }
            .into());
        }

        if !self.json && !self.html {
            return Err(ConfigError::InvalidValue {
                field: "json/html".to_string(),
                value: "false/false".to_string(),
                hint: "Enable at least one output".to_string(),
            }
            .into());
        }

        // compiles the pattern
        self.analyze_options()?;

        Ok(())
    }
}
