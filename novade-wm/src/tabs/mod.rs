//! Tab groups: windows sharing one screen region with one member shown at a time.

pub mod group;
pub mod manager;

pub use group::{GroupId, WindowGroup};
pub use manager::TabManager;
