#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn valid_config(root: &TempDir) -> ModmapConfig {
        ModmapConfig {
            root: Some(root.path().to_path_buf()),
            ..ModmapConfig::default()
        }
    }

    #[test]
    fn test_serialization() {
        let config = ModmapConfig {
            root: Some(PathBuf::from("src")),
            include_type_imports: true,
            ..ModmapConfig::default()
        };
        let json_val = serde_json::to_value(&config).unwrap();
        assert!(json_val.get("outDir").is_some());
        assert!(json_val.get("includeTypeImports").is_some());
        assert!(json_val.get("out_dir").is_none());

        let back: ModmapConfig = serde_json::from_value(json_val).unwrap();
        assert_eq!(back, config);

        // root is omitted when unset
        let json_val = serde_json::to_value(ModmapConfig::default()).unwrap();
        assert!(json_val.get("root").is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<ModmapConfig, _> = serde_json::from_str(r#"{"rooot": "src"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ModmapConfig = serde_json::from_str(r#"{"root": "src"}"#).unwrap();
        assert_eq!(config.exclude, modmap_graph::DEFAULT_EXCLUDE);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert!(config.json && config.html);
        assert!(!config.include_type_imports);
    }

    #[test]
    fn test_file_then_cli_precedence() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("modmap.config.json");
        fs::write(
            &file,
            r#"{"root": "from-file", "outDir": "file-out", "html": false}"#,
        )
        .unwrap();

        let config = ModmapConfig::load_from(&CliOverrides::default(), Some(&file)).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("from-file")));
        assert_eq!(config.out_dir, PathBuf::from("file-out"));
        assert!(!config.html);

        let overrides = CliOverrides {
            root: Some(PathBuf::from("from-cli")),
            ..CliOverrides::default()
        };
        let config = ModmapConfig::load_from(&overrides, Some(&file)).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("from-cli")));
        // untouched by the CLI
        assert_eq!(config.out_dir, PathBuf::from("file-out"));
        assert!(!config.html);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("modmap.config.json");
        fs::write(&file, r#"{"json": "yes"}"#).unwrap();

        let err = ModmapConfig::load_from(&CliOverrides::default(), Some(&file)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Load(_))));
    }

    #[test]
    fn test_overrides_from_args() {
        let args = crate::cli::AnalyzeArgs {
            root: Some(PathBuf::from("src")),
            no_html: true,
            ..Default::default()
        };
        let overrides = CliOverrides::from(&args);
        assert_eq!(overrides.html, Some(false));
        assert_eq!(overrides.json, None);
        assert_eq!(overrides.include_type_imports, None);

        let value = serde_json::to_value(&overrides).unwrap();
        assert!(value.get("json").is_none());
        assert!(value.get("outDir").is_none());
    }

    #[test]
    fn test_env_sits_between_file_and_cli() {
        const PREFIX: &str = "MODMAP_LAYER_TEST_";
        unsafe {
            std::env::set_var("MODMAP_LAYER_TEST_OUT_DIR", "env-out");
            std::env::set_var("MODMAP_LAYER_TEST_HTML", "false");
            std::env::set_var("MODMAP_LAYER_TEST_INCLUDE_TYPE_IMPORTS", "true");
            std::env::set_var("MODMAP_LAYER_TEST_ROOT", "env-root");
        }

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("modmap.config.json");
        fs::write(
            &file,
            r#"{"root": "file-root", "outDir": "file-out", "exclude": "file"}"#,
        )
        .unwrap();

        let overrides = CliOverrides {
            root: Some(PathBuf::from("cli-root")),
            ..CliOverrides::default()
        };
        let config = ModmapConfig::load_layers(&overrides, Some(&file), PREFIX).unwrap();

        unsafe {
            std::env::remove_var("MODMAP_LAYER_TEST_OUT_DIR");
            std::env::remove_var("MODMAP_LAYER_TEST_HTML");
            std::env::remove_var("MODMAP_LAYER_TEST_INCLUDE_TYPE_IMPORTS");
            std::env::remove_var("MODMAP_LAYER_TEST_ROOT");
        }

        // env over file
        assert_eq!(config.out_dir, PathBuf::from("env-out"));
        assert!(!config.html);
        assert!(config.include_type_imports);
        // file where env is silent
        assert_eq!(config.exclude, "file");
        // cli over env
        assert_eq!(config.root, Some(PathBuf::from("cli-root")));
    }

    #[test]
    fn test_env_overrides_read_snake_case_keys() {
        unsafe {
            std::env::set_var("MODMAP_ENV_KEYS_TEST_OUT_DIR", "reports");
            std::env::set_var("MODMAP_ENV_KEYS_TEST_JSON", "false");
        }
        let env = CliOverrides::from_env("MODMAP_ENV_KEYS_TEST_").unwrap();
        unsafe {
            std::env::remove_var("MODMAP_ENV_KEYS_TEST_OUT_DIR");
            std::env::remove_var("MODMAP_ENV_KEYS_TEST_JSON");
        }

        assert_eq!(env.out_dir, Some(PathBuf::from("reports")));
        assert_eq!(env.json, Some(false));
        assert_eq!(env.root, None);

        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["outDir"], "reports");
        assert!(value.get("out_dir").is_none());
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let args = crate::cli::AnalyzeArgs {
            config: Some(PathBuf::from("/definitely/not/here/modmap.config.json")),
            ..Default::default()
        };
        let err = ModmapConfig::load(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_validation() {
        let dir = TempDir::new().unwrap();
        assert!(valid_config(&dir).validate().is_ok());

        let err = ModmapConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("root"));

        let missing = ModmapConfig {
            root: Some(dir.path().join("nope")),
            ..ModmapConfig::default()
        };
        assert!(matches!(missing.validate(), Err(CliError::FileNotFound(_))));

        assert!(
            ModmapConfig {
                json: false,
                html: false,
                ..valid_config(&dir)
            }
            .validate()
            .is_err()
        );

        assert!(
            ModmapConfig {
                exclude: "(".to_string(),
                ..valid_config(&dir)
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_analyze_options() {
        let config = ModmapConfig {
            exclude: String::new(),
            include_type_imports: true,
            ..ModmapConfig::default()
        };
        let options = config.analyze_options().unwrap();
        assert!(options.walk.exclude.is_none());
        assert!(options.build.extract.include_type_imports);
    }

    #[test]
    fn test_schema() {
        let schema = ModmapConfig::json_schema().unwrap();
        assert!(schema.is_object());
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("outDir").is_some());
        assert!(properties.get("includeTypeImports").is_some());
    }
}
