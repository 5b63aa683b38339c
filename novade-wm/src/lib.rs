//! # NovaDE Window Management (`novade-wm`)
//!
//! The headless window-management core of the NovaDE desktop shell. It keeps the
//! authoritative model of every window and coordinates the components that act on it:
//!
//! - **Windows** (`window`): registry, per-window state and derived visibility, snap regions.
//! - **Layout** (`layout`): free, tiling (grid), stacking, tabbed and floating arrangements.
//! - **Workspaces** (`workspaces`): named window sets, exactly one of them active.
//! - **Tab groups** (`tabs`): windows sharing a region, one member shown at a time.
//! - **Stage mode** (`stage`): an overview grid that restores geometry on exit.
//! - **Events** (`events`): a broadcast stream of every observable change.
//!
//! [`WindowManager`] ties these together; [`DefaultWindowManagerService`] exposes it
//! behind an async mutex for sharing across tasks.
//!
//! ## Usage
//!
//! ```rust
//! use novade_wm::{SnapPosition, WindowManager, WindowState, WindowType};
//!
//! let mut wm = WindowManager::with_defaults();
//! let editor = wm.create_window("Editor", 100, 100, 800, 600, WindowType::Normal).unwrap();
//! wm.snap_window(editor, SnapPosition::Left).unwrap();
//!
//! let window = wm.get_window(editor).unwrap();
//! assert_eq!(window.state(), WindowState::Snapped);
//! assert_eq!(window.geometry().width(), 960);
//! ```

pub mod error;
pub mod events;
pub mod layout;
pub mod manager;
pub mod service;
pub mod stage;
pub mod tabs;
pub mod window;
pub mod workspaces;

// Re-export key types for convenience
pub use error::{ErrorKind, WindowManagementError};
pub use events::{EventKind, EventPublisher, WindowManagerEvent};
pub use layout::{LayoutEngine, LayoutType};
pub use manager::{CycleDirection, WindowManager};
pub use service::{DefaultWindowManagerService, WindowManagerService};
pub use stage::{StageManager, StageState};
pub use tabs::{GroupId, TabManager, WindowGroup};
pub use window::{SnapPosition, Window, WindowId, WindowState, WindowType};
pub use workspaces::{Workspace, WorkspaceId, WorkspaceManager};
