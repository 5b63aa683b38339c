//! Configuration Management for NovaDE Core.
//!
//! ## Key Components:
//!
//! - [`types`]: The configuration schema ([`CoreConfig`], [`LoggingConfig`],
//!   [`WindowManagementConfig`]).
//! - [`defaults`]: Functions returning default values for every setting, used when a
//!   configuration file is missing or incomplete.
//! - [`loader`]: The [`ConfigLoader`], which locates, parses and validates `config.toml`.
//!
//! ## Configuration Loading Process:
//!
//! 1. `ConfigLoader::load()` looks for `config.toml` in the application configuration
//!    directory (determined by `utils::paths`).
//! 2. If the file is not found, a default `CoreConfig` is generated.
//! 3. Otherwise its TOML content is parsed into `CoreConfig`; parsing errors map to
//!    [`crate::error::ConfigError::ParseError`].
//! 4. The result is validated (log levels normalized, relative log paths resolved,
//!    window-management values range-checked); failures map to
//!    [`crate::error::ConfigError::ValidationError`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use novade_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Loaded log level: {}", config.logging.level),
//!     Err(e) => {
//!         novade_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration error: {}", e);
//!     }
//! }
//! ```

pub mod defaults;
pub mod types;
pub mod loader;

pub use types::{CoreConfig, LoggingConfig, WindowManagementConfig};
pub use loader::{ConfigLoader, KNOWN_LAYOUT_NAMES};
