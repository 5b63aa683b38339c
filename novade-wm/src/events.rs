//! Notifications published by the window-management core.
//!
//! Every component holds a clone of the same [`EventPublisher`]; events are sent
//! synchronously while the triggering command runs, so subscribers observe them
//! in exactly the order the mutations happened.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use novade_core::types::RectInt;

use crate::layout::LayoutType;
use crate::tabs::GroupId;
use crate::window::{WindowId, WindowState};
use crate::workspaces::WorkspaceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowManagerEvent {
    WindowCreated { window_id: WindowId, workspace_id: WorkspaceId },
    WindowDestroyed { window_id: WindowId },
    WindowActivated { window_id: WindowId, previous: Option<WindowId> },
    GeometryChanged { window_id: WindowId, geometry: RectInt },
    VisibilityChanged { window_id: WindowId, visible: bool },
    StateChanged { window_id: WindowId, old_state: WindowState, new_state: WindowState },
    ZOrderChanged { window_id: WindowId },
    WorkspaceCreated { workspace_id: WorkspaceId, name: String },
    WorkspaceRemoved { workspace_id: WorkspaceId },
    WorkspaceActivated { workspace_id: WorkspaceId, previous: Option<WorkspaceId> },
    WindowWorkspaceChanged {
        window_id: WindowId,
        old_workspace: Option<WorkspaceId>,
        new_workspace: WorkspaceId,
    },
    GroupCreated { group_id: GroupId },
    GroupRemoved { group_id: GroupId },
    GroupMembershipChanged { group_id: GroupId, window_id: WindowId, joined: bool },
    GroupActiveChanged { group_id: GroupId, window_id: Option<WindowId> },
    LayoutChanged { layout: LayoutType },
    StageEntered,
    StageExited,
}

/// Discriminant of a [`WindowManagerEvent`], for filtering without matching fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    WindowCreated,
    WindowDestroyed,
    WindowActivated,
    GeometryChanged,
    VisibilityChanged,
    StateChanged,
    ZOrderChanged,
    WorkspaceCreated,
    WorkspaceRemoved,
    WorkspaceActivated,
    WindowWorkspaceChanged,
    GroupCreated,
    GroupRemoved,
    GroupMembershipChanged,
    GroupActiveChanged,
    LayoutChanged,
    StageEntered,
    StageExited,
}

impl WindowManagerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WindowCreated { .. } => EventKind::WindowCreated,
            Self::WindowDestroyed { .. } => EventKind::WindowDestroyed,
            Self::WindowActivated { .. } => EventKind::WindowActivated,
            Self::GeometryChanged { .. } => EventKind::GeometryChanged,
            Self::VisibilityChanged { .. } => EventKind::VisibilityChanged,
            Self::StateChanged { .. } => EventKind::StateChanged,
            Self::ZOrderChanged { .. } => EventKind::ZOrderChanged,
            Self::WorkspaceCreated { .. } => EventKind::WorkspaceCreated,
            Self::WorkspaceRemoved { .. } => EventKind::WorkspaceRemoved,
            Self::WorkspaceActivated { .. } => EventKind::WorkspaceActivated,
            Self::WindowWorkspaceChanged { .. } => EventKind::WindowWorkspaceChanged,
            Self::GroupCreated { .. } => EventKind::GroupCreated,
            Self::GroupRemoved { .. } => EventKind::GroupRemoved,
            Self::GroupMembershipChanged { .. } => EventKind::GroupMembershipChanged,
            Self::GroupActiveChanged { .. } => EventKind::GroupActiveChanged,
            Self::LayoutChanged { .. } => EventKind::LayoutChanged,
            Self::StageEntered => EventKind::StageEntered,
            Self::StageExited => EventKind::StageExited,
        }
    }

    /// The window this event is about, if any.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::WindowCreated { window_id, .. }
            | Self::WindowDestroyed { window_id }
            | Self::WindowActivated { window_id, .. }
            | Self::GeometryChanged { window_id, .. }
            | Self::VisibilityChanged { window_id, .. }
            | Self::StateChanged { window_id, .. }
            | Self::ZOrderChanged { window_id }
            | Self::WindowWorkspaceChanged { window_id, .. }
            | Self::GroupMembershipChanged { window_id, .. } => Some(*window_id),
            Self::GroupActiveChanged { window_id, .. } => *window_id,
            _ => None,
        }
    }
}

/// Cloneable handle to the shared broadcast channel.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<WindowManagerEvent>,
}

impl EventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Sends an event to all current subscribers. Having none is not an error.
    pub fn publish(&self, event: WindowManagerEvent) {
        trace!("Publishing {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WindowManagerEvent> {
        self.sender.subscribe()
    }
}
