//! Configuration Data Structures for NovaDE Core.
//!
//! These structs are populated by deserializing `config.toml`. Missing fields take
//! their values from [`super::defaults`], and unknown fields are rejected via
//! `#[serde(deny_unknown_fields)]`.

use serde::Deserialize;
use std::path::PathBuf;
use super::defaults;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use novade_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/novade_wm.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/novade_wm.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a file where logs should be written.
    /// Relative paths are resolved against the application's state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// The format for log messages. Valid values (case-insensitive): "text", "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Settings consumed by the window-management core at construction time.
///
/// ```
/// use novade_core::config::WindowManagementConfig;
///
/// let config: WindowManagementConfig = toml::from_str("screen_width = 2560\nstage_padding = 8").unwrap();
/// assert_eq!(config.screen_width, 2560);
/// assert_eq!(config.screen_height, 1080);
/// assert_eq!(config.stage_padding, 8);
/// assert_eq!(config.default_layout, "free");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowManagementConfig {
    /// Width of the screen area used for snapping, stage mode and default workspace geometry.
    #[serde(default = "defaults::default_screen_width")]
    pub screen_width: u32,
    /// Height of the screen area.
    #[serde(default = "defaults::default_screen_height")]
    pub screen_height: u32,
    /// Name of the workspace created at initialization.
    #[serde(default = "defaults::default_workspace_name")]
    pub default_workspace_name: String,
    /// Initial layout: "free", "tiling", "stacking", "tabbed" or "floating".
    #[serde(default = "defaults::default_layout")]
    pub default_layout: String,
    /// Pixel gap around and between stage (overview) cells.
    #[serde(default = "defaults::default_stage_padding")]
    pub stage_padding: u32,
    /// Buffer size of the broadcast channel carrying window-manager events.
    #[serde(default = "defaults::default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for WindowManagementConfig {
    fn default() -> Self {
        defaults::default_window_management_config()
    }
}

/// Root configuration structure.
///
/// ```
/// use novade_core::config::CoreConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [window_management]
/// default_layout = "tiling"
/// "#;
/// let loaded_config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(loaded_config.logging.level, "warn");
/// assert_eq!(loaded_config.window_management.default_layout, "tiling");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    /// Configuration for the window-management core.
    #[serde(default = "defaults::default_window_management_config")]
    pub window_management: WindowManagementConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
            window_management: defaults::default_window_management_config(),
        }
    }
}
