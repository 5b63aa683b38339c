//! Virtual desktops.
//!
//! [`WorkspaceManager`] owns every [`Workspace`], the window→workspace index and
//! the single active workspace.

pub mod manager;
pub mod workspace;

pub use manager::WorkspaceManager;
pub use workspace::{Workspace, WorkspaceId};
