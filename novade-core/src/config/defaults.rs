//! Default configuration values for NovaDE Core.
//!
//! These functions are used by `serde`'s `default` attribute in the configuration
//! structures to provide sensible default values when they are not specified in
//! the configuration file.

use crate::config::{LoggingConfig, WindowManagementConfig};
use std::path::PathBuf;

/// Returns the default `LoggingConfig`.
///
/// Used by `CoreConfig` if the `logging` section is missing from `config.toml`.
pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

/// Returns the default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log file path (`None`).
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None // No log file by default
}

/// Returns the default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Returns the default `WindowManagementConfig`.
///
/// Used by `CoreConfig` if the `window_management` section is missing.
pub(super) fn default_window_management_config() -> WindowManagementConfig {
    WindowManagementConfig {
        screen_width: default_screen_width(),
        screen_height: default_screen_height(),
        default_workspace_name: default_workspace_name(),
        default_layout: default_layout(),
        stage_padding: default_stage_padding(),
        event_channel_capacity: default_event_channel_capacity(),
    }
}

pub(super) fn default_screen_width() -> u32 {
    1920
}

pub(super) fn default_screen_height() -> u32 {
    1080
}

pub(super) fn default_workspace_name() -> String {
    "Workspace 1".to_string()
}

/// Layout applied by the layout engine before any explicit switch.
pub(super) fn default_layout() -> String {
    "free".to_string()
}

/// Gap in pixels between stage (overview) cells and around the stage area.
pub(super) fn default_stage_padding() -> u32 {
    20
}

pub(super) fn default_event_channel_capacity() -> usize {
    256
}
