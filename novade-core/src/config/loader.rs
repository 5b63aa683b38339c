//! Configuration Loading for NovaDE Core.
//!
//! [`ConfigLoader`] locates, parses and validates the [`CoreConfig`].
//!
//! ## Configuration File Location
//!
//! `ConfigLoader::load()` reads `config.toml` from the application-specific
//! configuration directory, as determined by
//! [`crate::utils::paths::get_app_config_dir`]. If the file is not found, a default
//! configuration is used. Explicit sources are handled by
//! [`ConfigLoader::load_from_path`] and [`ConfigLoader::from_toml_str`].
//!
//! ## Validation
//!
//! Every loaded configuration goes through `validate_config`:
//! - log levels and formats are normalized to lowercase and checked;
//! - relative log file paths are resolved against the application's state directory
//!   and the parent directory is created;
//! - screen dimensions and the event channel capacity must be non-zero;
//! - `stage_padding` must leave room for a cell on the smaller screen side;
//! - the default layout must be one of [`KNOWN_LAYOUT_NAMES`].

use std::fs;
use std::path::Path;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as nova_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

/// Layout names accepted for `window_management.default_layout`.
pub const KNOWN_LAYOUT_NAMES: [&str; 5] = ["free", "tiling", "stacking", "tabbed", "floating"];

/// `ConfigLoader` provides static methods to load and validate `CoreConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the `CoreConfig` from the user configuration directory.
    ///
    /// A missing `config.toml` (or an empty one) yields the default configuration.
    /// Other read errors map to [`ConfigError::ReadError`], parse errors to
    /// [`ConfigError::ParseError`].
    pub fn load() -> Result<CoreConfig, CoreError> {
        let user_config_path = get_app_config_dir()?.join("config.toml");
        Self::load_from_path(&user_config_path)
    }

    /// Loads and validates the `CoreConfig` from an explicit file.
    ///
    /// Like [`ConfigLoader::load`], a file that does not exist yields defaults.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No configuration file at {:?}, using defaults.", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
            Err(e) => Err(CoreError::Config(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }

    /// Parses and validates TOML content. Blank content yields defaults.
    pub fn from_toml_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Validates the loaded `CoreConfig` and normalizes values in place.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            let absolute_path = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    nova_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        let wm = &mut config.window_management;
        if wm.screen_width == 0 || wm.screen_height == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "Screen size must be non-zero, got {}x{}.",
                wm.screen_width, wm.screen_height
            ))));
        }
        let shorter_side = wm.screen_width.min(wm.screen_height);
        if u64::from(wm.stage_padding) * 2 >= u64::from(shorter_side) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "stage_padding {} is too large for a {}x{} screen.",
                wm.stage_padding, wm.screen_width, wm.screen_height
            ))));
        }
        if wm.event_channel_capacity == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "event_channel_capacity must be greater than zero.".to_string(),
            )));
        }
        let layout_lower = wm.default_layout.to_lowercase();
        if !KNOWN_LAYOUT_NAMES.contains(&layout_lower.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "Invalid default_layout: '{}'. Must be one of {}.",
                wm.default_layout,
                KNOWN_LAYOUT_NAMES.join(", ")
            ))));
        }
        wm.default_layout = layout_lower;
        if wm.default_workspace_name.trim().is_empty() {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "default_workspace_name must not be empty.".to_string(),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn assert_validation_error(result: Result<CoreConfig, CoreError>, needle: &str) {
        match result {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains(needle), "message '{}' does not contain '{}'", msg, needle)
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_str_blank_yields_defaults() {
        let config = ConfigLoader::from_toml_str("   \n").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.window_management.screen_width, 1920);
    }

    #[test]
    fn test_from_toml_str_normalizes_case() {
        let config = ConfigLoader::from_toml_str(
            r#"
            [logging]
            level = "DEBUG"
            format = "Json"

            [window_management]
            default_layout = "Tiling"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.window_management.default_layout, "tiling");
    }

    #[rstest]
    #[case("[logging]\nlevel = \"loud\"", "Invalid log level")]
    #[case("[logging]\nformat = \"xml\"", "Invalid log format")]
    #[case("[window_management]\nscreen_width = 0", "Screen size must be non-zero")]
    #[case("[window_management]\ndefault_layout = \"spiral\"", "Invalid default_layout")]
    #[case("[window_management]\nstage_padding = 540", "stage_padding 540 is too large")]
    #[case("[window_management]\nscreen_height = 100\nstage_padding = 4000000000", "stage_padding")]
    #[case("[window_management]\nevent_channel_capacity = 0", "event_channel_capacity")]
    #[case("[window_management]\ndefault_workspace_name = \" \"", "default_workspace_name")]
    fn test_from_toml_str_rejects_invalid_values(#[case] content: &str, #[case] needle: &str) {
        assert_validation_error(ConfigLoader::from_toml_str(content), needle);
    }

    #[test]
    fn test_from_toml_str_parse_error() {
        let result = ConfigLoader::from_toml_str("this is not valid toml");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_load_from_path_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_from_path(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.window_management.default_workspace_name, "Workspace 1");
    }

    #[test]
    fn test_load_from_path_reads_file_and_creates_log_dir() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs/nested/wm.log");
        let config_path = temp_dir.path().join("config.toml");
        std_fs::write(
            &config_path,
            format!(
                "[logging]\nfile_path = {:?}\n\n[window_management]\nscreen_width = 2560\nscreen_height = 1440\n",
                log_path.to_string_lossy()
            ),
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(&config_path).unwrap();
        assert_eq!(config.window_management.screen_width, 2560);
        assert_eq!(config.window_management.screen_height, 1440);
        assert_eq!(config.logging.file_path, Some(log_path.clone()));
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_load_from_path_directory_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_path(temp_dir.path());
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ReadError { .. }))));
    }
}
