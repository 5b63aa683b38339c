//! Shareable async front-end over [`WindowManager`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::manager::{CycleDirection, WindowManager};
use crate::tabs::GroupId;
use crate::window::{SnapPosition, Window, WindowId, WindowType};
use crate::workspaces::{Workspace, WorkspaceId};

#[async_trait]
pub trait WindowManagerService: Send + Sync {
    async fn create_window(
        &self,
        title: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        window_type: WindowType,
    ) -> Result<WindowId, WindowManagementError>;
    async fn destroy_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;
    async fn activate_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;
    async fn cycle_active_window(&self, direction: CycleDirection) -> Result<Option<WindowId>, WindowManagementError>;
    async fn minimize_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;
    async fn maximize_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;
    async fn restore_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;
    async fn set_fullscreen(&self, window_id: WindowId, fullscreen: bool) -> Result<(), WindowManagementError>;
    async fn move_window(&self, window_id: WindowId, x: i32, y: i32) -> Result<(), WindowManagementError>;
    async fn resize_window(&self, window_id: WindowId, width: i32, height: i32) -> Result<(), WindowManagementError>;
    async fn snap_window(&self, window_id: WindowId, position: SnapPosition) -> Result<(), WindowManagementError>;
    async fn tile_windows(&self, layout_name: String, workspace_id: Option<WorkspaceId>) -> Result<(), WindowManagementError>;

    async fn create_workspace(&self, name: String) -> WorkspaceId;
    async fn remove_workspace(&self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError>;
    async fn activate_workspace(&self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError>;
    async fn move_window_to_workspace(&self, window_id: WindowId, workspace_id: WorkspaceId) -> Result<(), WindowManagementError>;

    async fn tab_windows(&self, a: WindowId, b: WindowId) -> Result<GroupId, WindowManagementError>;
    async fn untab_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;

    async fn toggle_stage(&self);
    async fn select_stage_window(&self, window_id: WindowId) -> Result<(), WindowManagementError>;

    // Queries return snapshots; they never hold the lock past the call.
    async fn get_window(&self, window_id: WindowId) -> Option<Window>;
    async fn all_windows(&self) -> Vec<Window>;
    async fn active_window_id(&self) -> Option<WindowId>;
    async fn all_workspaces(&self) -> Vec<Workspace>;
    async fn active_workspace_id(&self) -> WorkspaceId;

    fn subscribe_to_events(&self) -> broadcast::Receiver<WindowManagerEvent>;
}

/// [`WindowManagerService`] backed by a [`WindowManager`] behind an async mutex.
/// Clones share the same manager.
#[derive(Clone)]
pub struct DefaultWindowManagerService {
    internal: Arc<Mutex<WindowManager>>,
    events: EventPublisher,
}

impl DefaultWindowManagerService {
    pub fn new(manager: WindowManager) -> Self {
        let events = manager.event_publisher();
        Self { internal: Arc::new(Mutex::new(manager)), events }
    }

    /// Runs `f` with exclusive access to the underlying manager.
    pub async fn with_manager<R>(&self, f: impl FnOnce(&mut WindowManager) -> R) -> R {
        let mut guard = self.internal.lock().await;
        f(&mut *guard)
    }
}

impl Default for DefaultWindowManagerService {
    fn default() -> Self {
        Self::new(WindowManager::with_defaults())
    }
}

#[async_trait]
impl WindowManagerService for DefaultWindowManagerService {
    async fn create_window(
        &self,
        title: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        window_type: WindowType,
    ) -> Result<WindowId, WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.create_window(title, x, y, width, height, window_type)
    }

    async fn destroy_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.destroy_window(window_id)
    }

    async fn activate_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.activate_window(window_id)
    }

    async fn cycle_active_window(&self, direction: CycleDirection) -> Result<Option<WindowId>, WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.cycle_active_window(direction)
    }

    async fn minimize_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.minimize_window(window_id)
    }

    async fn maximize_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.maximize_window(window_id)
    }

    async fn restore_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.restore_window(window_id)
    }

    async fn set_fullscreen(&self, window_id: WindowId, fullscreen: bool) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.set_fullscreen(window_id, fullscreen)
    }

    async fn move_window(&self, window_id: WindowId, x: i32, y: i32) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.move_window(window_id, x, y)
    }

    async fn resize_window(&self, window_id: WindowId, width: i32, height: i32) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.resize_window(window_id, width, height)
    }

    async fn snap_window(&self, window_id: WindowId, position: SnapPosition) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.snap_window(window_id, position)
    }

    async fn tile_windows(&self, layout_name: String, workspace_id: Option<WorkspaceId>) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        debug!("Service: tile_windows({}, {:?})", layout_name, workspace_id);
        guard.tile_windows(&layout_name, workspace_id)
    }

    async fn create_workspace(&self, name: String) -> WorkspaceId {
        let mut guard = self.internal.lock().await;
        guard.create_workspace(name)
    }

    async fn remove_workspace(&self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.remove_workspace(workspace_id)
    }

    async fn activate_workspace(&self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.activate_workspace(workspace_id)
    }

    async fn move_window_to_workspace(&self, window_id: WindowId, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.move_window_to_workspace(window_id, workspace_id)
    }

    async fn tab_windows(&self, a: WindowId, b: WindowId) -> Result<GroupId, WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.tab_windows(a, b)
    }

    async fn untab_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.untab_window(window_id)
    }

    async fn toggle_stage(&self) {
        let mut guard = self.internal.lock().await;
        guard.toggle_stage();
    }

    async fn select_stage_window(&self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let mut guard = self.internal.lock().await;
        guard.select_stage_window(window_id)
    }

    async fn get_window(&self, window_id: WindowId) -> Option<Window> {
        let guard = self.internal.lock().await;
        guard.get_window(window_id).cloned()
    }

    async fn all_windows(&self) -> Vec<Window> {
        let guard = self.internal.lock().await;
        guard.all_windows().into_iter().cloned().collect()
    }

    async fn active_window_id(&self) -> Option<WindowId> {
        self.internal.lock().await.active_window_id()
    }

    async fn all_workspaces(&self) -> Vec<Workspace> {
        let guard = self.internal.lock().await;
        guard.workspace_manager().all_workspaces_ordered().into_iter().cloned().collect()
    }

    async fn active_workspace_id(&self) -> WorkspaceId {
        self.internal.lock().await.active_workspace_id()
    }

    fn subscribe_to_events(&self) -> broadcast::Receiver<WindowManagerEvent> {
        self.events.subscribe()
    }
}
