//! Core data types used throughout NovaDE.
//!
//! Currently this is the integer geometry shared by the window-management core
//! ([`PointInt`], [`SizeInt`], [`RectInt`]). All types are serializable with Serde.

pub mod geometry;

pub use self::geometry::{PointInt, RectInt, SizeInt};
