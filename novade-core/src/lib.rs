//! # NovaDE Core Library (`novade-core`)
//!
//! `novade-core` is the foundational library underneath the NovaDE window-management
//! core (`novade-wm`). It provides the pieces every other layer leans on:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types `ConfigError` and `LoggingError`.
//! - **Geometry**: Integer primitives (`PointInt`, `SizeInt`, `RectInt`) used for
//!   window, workspace and screen geometry.
//! - **Configuration Management**: Loading, parsing and validating `config.toml`
//!   through the `ConfigLoader` and `CoreConfig` structs.
//! - **Logging**: A logging setup built on top of the `tracing` crate,
//!   configurable for console and file output in text or JSON format.
//! - **Utility Functions**: Filesystem (`utils::fs`) and XDG path (`utils::paths`) helpers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novade_core::config::ConfigLoader;
//! use novade_core::logging::init_logging;
//! use novade_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!
//!     tracing::info!("NovaDE Core initialized successfully.");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use error::{CoreError, ConfigError, LoggingError};
pub use types::{PointInt, SizeInt, RectInt};
pub use config::{CoreConfig, LoggingConfig, WindowManagementConfig, ConfigLoader};
pub use logging::{init_logging, init_minimal_logging};
pub use utils::ensure_dir_exists;
