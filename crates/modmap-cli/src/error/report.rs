//! Miette report conversion for CLI errors.

use miette::Report;

use crate::error::{CliError, ConfigError};

/// Convert a `CliError` into a miette report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Analysis(modmap_graph::Error::Walk(walk)) => miette::miette!(
            help = "Check that the path exists and is a readable directory",
            "{}",
            walk
        ),
        CliError::Analysis(e) => miette::miette!("Analysis failed: {}", e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => miette::miette!(
            help = hint,
            "Invalid value for '{}': {}",
            field,
            value
        ),
        ConfigError::MissingField { field, hint } => {
            miette::miette!(help = hint, "Missing required field: {}", field)
        }
        other => miette::miette!("Configuration error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_errors_keep_their_hint() {
        let report = cli_error_to_miette(
            ConfigError::MissingField {
                field: "root".to_string(),
                hint: "Pass a directory".to_string(),
            }
            .into(),
        );
        assert!(report.to_string().contains("root"));
        assert_eq!(
            report.help().map(|h| h.to_string()),
            Some("Pass a directory".to_string())
        );
    }

    #[test]
    fn other_errors_use_display() {
        let report = cli_error_to_miette(CliError::FileNotFound(PathBuf::from("x.ts")));
        assert!(report.to_string().contains("x.ts"));
    }
}
