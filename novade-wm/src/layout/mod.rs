//! Layout policies and the [`LayoutEngine`] that applies them.
//!
//! - [`types`]: [`LayoutType`] and its textual names.
//! - [`grid`]: Grid dimensioning and cell placement, also used by stage mode.
//! - [`engine`]: The engine tracking a window set and a target area.

pub mod engine;
pub mod grid;
pub mod types;

pub use engine::{arrange, LayoutEngine};
pub use grid::{grid_cells, grid_dimensions};
pub use types::LayoutType;
