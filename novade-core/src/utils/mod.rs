//! General Utilities for NovaDE Core.
//!
//! # Submodules
//!
//! - [`fs`]: Filesystem utilities, such as ensuring directory existence.
//! - [`paths`]: Resolution of XDG base directories and application-specific paths.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
