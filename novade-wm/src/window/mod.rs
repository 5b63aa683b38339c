//! Window entity, its identifiers and enumerations, the snap regions, and the
//! [`WindowRegistry`] arena that owns every live window.

pub mod registry;
pub mod snap;
pub mod types;

pub use registry::WindowRegistry;
pub use snap::SnapPosition;
pub use types::{Window, WindowId, WindowState, WindowType};
