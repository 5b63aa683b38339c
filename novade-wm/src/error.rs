use thiserror::Error;

use novade_core::CoreError;

use crate::tabs::GroupId;
use crate::window::WindowId;
use crate::workspaces::WorkspaceId;

/// Defines the errors that can occur within the window-management core.
///
/// Every variant is a recoverable outcome: an operation that returns one of these
/// has left the window registry and all derived indices untouched.
#[derive(Error, Debug)]
pub enum WindowManagementError {
    /// The referenced window does not exist in the registry (or was destroyed).
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    #[error("Window group not found: {0}")]
    GroupNotFound(GroupId),

    /// The window is not a member of any tab group.
    #[error("Window {0} is not in any tab group")]
    WindowNotGrouped(WindowId),

    #[error("Window {window_id} is not a member of group {group_id}")]
    NotAGroupMember { window_id: WindowId, group_id: GroupId },

    #[error("Cannot tab window {0} together with itself")]
    SelfTab(WindowId),

    /// Removal was refused because the workspace is the only one left.
    #[error("Cannot remove workspace {0}: it is the last remaining workspace")]
    CannotRemoveLastWorkspace(WorkspaceId),

    #[error("Workspace name cannot be empty")]
    EmptyWorkspaceName,

    #[error("Stage mode is not active")]
    StageNotActive,

    #[error("Invalid geometry: width ({width}) and height ({height}) must not be negative")]
    InvalidGeometry { width: i32, height: i32 },

    #[error("Unknown layout: '{0}'")]
    UnknownLayout(String),

    /// Configuration or other infrastructure failure from `novade-core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Coarse classification of [`WindowManagementError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An id does not exist in the registry or a derived index.
    NotFound,
    /// The operation is not valid in the current state (e.g. removing the last workspace).
    InvalidState,
    /// An argument was rejected before any mutation (e.g. negative geometry).
    InvalidArgument,
    /// Construction-time configuration failure.
    Configuration,
}

impl WindowManagementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WindowNotFound(_) | Self::WorkspaceNotFound(_) | Self::GroupNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::WindowNotGrouped(_)
            | Self::NotAGroupMember { .. }
            | Self::CannotRemoveLastWorkspace(_)
            | Self::StageNotActive => ErrorKind::InvalidState,
            Self::SelfTab(_)
            | Self::EmptyWorkspaceName
            | Self::InvalidGeometry { .. }
            | Self::UnknownLayout(_) => ErrorKind::InvalidArgument,
            Self::Core(_) => ErrorKind::Configuration,
        }
    }
}
