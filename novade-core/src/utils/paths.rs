//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Resolves the directories the configuration loader and file logger need,
//! following the XDG Base Directory Specification via the `directories-next` crate:
//!
//! - [`get_app_config_dir()`]: e.g., `~/.config/NovaDE/NovaDE`, where `config.toml` lives.
//! - [`get_app_state_dir()`]: e.g., `~/.local/state/NovaDE/NovaDE`, the base for
//!   relative log file paths.
//!
//! Both return [`CoreError::Config(ConfigError::DirectoryUnavailable)`] when the
//! directory cannot be determined (e.g., when the HOME directory is not found).

use std::path::PathBuf;
use directories_next::{BaseDirs, ProjectDirs};
use crate::error::{CoreError, ConfigError};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "NovaDE";
const APPLICATION: &str = "NovaDE";

/// Returns the base directory for user-specific state files.
///
/// On Linux this is `$XDG_STATE_HOME`, falling back to `$HOME/.local/state`.
/// Other platforms use the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "State Base".to_string()
        }))
}

/// Returns the application-specific configuration directory for NovaDE.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "App Config".to_string()
        }))
}

/// Returns the application-specific state directory for NovaDE.
///
/// `ProjectDirs` has no dedicated state directory, so this appends
/// `ORGANIZATION/APPLICATION` to [`get_state_base_dir()`].
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base_state| base_state.join(ORGANIZATION).join(APPLICATION))
}
