use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use novade_core::config::{ConfigLoader, WindowManagementConfig};
use novade_core::types::{PointInt, RectInt, SizeInt};

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::layout::{arrange, LayoutEngine, LayoutType};
use crate::stage::StageManager;
use crate::tabs::{GroupId, TabManager};
use crate::window::{SnapPosition, Window, WindowId, WindowRegistry, WindowState, WindowType};
use crate::workspaces::{WorkspaceId, WorkspaceManager};

/// Direction for [`WindowManager::cycle_active_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// Top-level coordinator of the window-management core.
///
/// Owns the authoritative [`WindowRegistry`], the z-order (back to front: the last
/// entry is drawn on top) and the active-window pointer, together with the
/// workspace, tab, layout and stage components. Commands mutate the registry and
/// then notify the components that need to react; each component re-validates ids
/// against the registry it is handed.
///
/// Every command either succeeds or returns a [`WindowManagementError`] with the
/// state left unchanged.
#[derive(Debug)]
pub struct WindowManager {
    registry: WindowRegistry,
    z_order: Vec<WindowId>,
    active_window: Option<WindowId>,
    screen: RectInt,
    /// A relayout was skipped while stage mode owned the geometry.
    layout_pending: bool,
    workspaces: WorkspaceManager,
    tabs: TabManager,
    layout: LayoutEngine,
    stage: StageManager,
    events: EventPublisher,
}

impl WindowManager {
    /// Builds a window manager from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagementError::UnknownLayout`] if `default_layout` is not a
    /// known layout name.
    pub fn new(config: &WindowManagementConfig) -> Result<Self, WindowManagementError> {
        let layout_type: LayoutType = config.default_layout.parse()?;
        Ok(Self::build(config, layout_type))
    }

    /// Builds a window manager from [`WindowManagementConfig::default`].
    pub fn with_defaults() -> Self {
        Self::build(&WindowManagementConfig::default(), LayoutType::Free)
    }

    /// Loads `config.toml` from the user configuration directory.
    pub fn load() -> Result<Self, WindowManagementError> {
        let config = ConfigLoader::load()?;
        Self::new(&config.window_management)
    }

    pub fn from_config_file(path: &Path) -> Result<Self, WindowManagementError> {
        let config = ConfigLoader::load_from_path(path)?;
        Self::new(&config.window_management)
    }

    fn build(config: &WindowManagementConfig, layout_type: LayoutType) -> Self {
        let events = EventPublisher::new(config.event_channel_capacity);
        let screen = RectInt::from_coords(0, 0, config.screen_width, config.screen_height);
        let workspaces = WorkspaceManager::new(
            config.default_workspace_name.clone(),
            Some(screen),
            layout_type,
            events.clone(),
        );

        info!(
            "Window manager initialized: screen {}x{}, layout {}, stage padding {}",
            config.screen_width, config.screen_height, layout_type, config.stage_padding
        );
        let mut manager = Self {
            registry: WindowRegistry::new(),
            z_order: Vec::new(),
            active_window: None,
            screen,
            layout_pending: false,
            workspaces,
            tabs: TabManager::new(events.clone()),
            layout: LayoutEngine::new(layout_type, events.clone()),
            stage: StageManager::new(screen, config.stage_padding, events.clone()),
            events,
        };
        manager.relayout_active();
        manager
    }

    // --- Window lifecycle ---

    /// Creates a window on top of the z-order, assigned to the active workspace.
    /// It becomes the active window if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagementError::InvalidGeometry`] for a negative width or
    /// height; nothing is created in that case.
    pub fn create_window(
        &mut self,
        title: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        window_type: WindowType,
    ) -> Result<WindowId, WindowManagementError> {
        let size = SizeInt::from_signed(width, height)
            .ok_or(WindowManagementError::InvalidGeometry { width, height })?;
        let window_id = self.registry.insert(title, RectInt::new(PointInt::new(x, y), size), window_type);
        let workspace_id = match self.workspaces.assign_window_to_active_workspace(&mut self.registry, window_id) {
            Ok(workspace_id) => workspace_id,
            Err(err) => {
                self.registry.remove(window_id);
                return Err(err);
            }
        };
        self.z_order.push(window_id);

        info!("Created window {} ({:?}) on workspace {}", window_id, window_type, workspace_id);
        self.events.publish(WindowManagerEvent::WindowCreated { window_id, workspace_id });

        self.relayout_active();
        if self.stage.is_active() {
            self.stage.add_window(&mut self.registry, window_id)?;
        }
        if self.active_window.is_none() {
            self.activate_window(window_id)?;
        }
        Ok(window_id)
    }

    /// Destroys a window and drops it from every component. If it was active, the
    /// window directly above it takes over when visible, otherwise the topmost
    /// visible window.
    pub fn destroy_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        if self.registry.remove(window_id).is_none() {
            debug!("destroy_window: unknown window {}", window_id);
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        info!("Destroyed window {}", window_id);
        self.events.publish(WindowManagerEvent::WindowDestroyed { window_id });

        let z_index = self.z_order.iter().position(|id| *id == window_id);
        if let Some(index) = z_index {
            self.z_order.remove(index);
        }
        self.tabs.remove_window(&mut self.registry, window_id);
        self.workspaces.remove_window(window_id);
        self.stage.remove_window(&mut self.registry, window_id);
        self.relayout_active();

        if self.active_window == Some(window_id) {
            self.active_window = None;
            let above = z_index
                .and_then(|index| self.z_order.get(index).copied())
                .filter(|id| self.is_focusable(*id));
            let next = above.or_else(|| self.topmost_focusable());
            if let Some(next) = next {
                self.activate_window(next)?;
            }
        }
        Ok(())
    }

    /// Activates a window: raises it, switches to its workspace, selects it in its
    /// tab group and restores it if minimized. A no-op if it is already active.
    pub fn activate_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        if !self.registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        if self.active_window == Some(window_id) {
            return Ok(());
        }

        let previous = self.active_window.take();
        if let Some(window) = previous.and_then(|id| self.registry.get_mut(id)) {
            window.set_active(false);
        }

        if let Some(workspace_id) = self.workspaces.workspace_for_window(window_id) {
            if workspace_id != self.workspaces.active_workspace_id() {
                self.switch_workspace(workspace_id)?;
            }
        }
        if self.tabs.group_of(window_id).is_some() {
            self.tabs.activate_in_group(&mut self.registry, window_id)?;
        }
        if self.registry.get(window_id).map_or(false, |w| w.is_minimized()) {
            self.transition(window_id, WindowState::Normal);
            self.relayout_active();
        }
        self.move_in_z_order(window_id, true);

        if let Some(window) = self.registry.get_mut(window_id) {
            window.set_active(true);
        }
        self.active_window = Some(window_id);
        debug!("Activated window {} (previous: {:?})", window_id, previous);
        self.events.publish(WindowManagerEvent::WindowActivated { window_id, previous });
        Ok(())
    }

    /// Activates the next visible window in creation order, wrapping around.
    /// Returns the newly active window, or `None` if nothing is visible.
    pub fn cycle_active_window(
        &mut self,
        direction: CycleDirection,
    ) -> Result<Option<WindowId>, WindowManagementError> {
        let candidates: Vec<WindowId> =
            self.registry.iter().filter(|w| w.is_visible()).map(|w| w.id()).collect();
        let len = candidates.len();
        if len == 0 {
            return Ok(None);
        }
        let current = self.active_window.and_then(|id| candidates.iter().position(|c| *c == id));
        let next_index = match (current, direction) {
            (Some(i), CycleDirection::Forward) => (i + 1) % len,
            (Some(i), CycleDirection::Backward) => (i + len - 1) % len,
            (None, CycleDirection::Forward) => 0,
            (None, CycleDirection::Backward) => len - 1,
        };
        let next = candidates[next_index];
        self.activate_window(next)?;
        Ok(Some(next))
    }

    // --- Window state ---

    pub fn maximize_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        self.set_state(window_id, WindowState::Maximized)
    }

    /// Minimizes a window. Minimizing the active window activates the topmost
    /// remaining visible window.
    pub fn minimize_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        let changed = self
            .transition(window_id, WindowState::Minimized)
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        if !changed {
            return Ok(());
        }
        self.relayout_active();
        if self.active_window == Some(window_id) {
            self.refocus()?;
        }
        Ok(())
    }

    pub fn restore_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        self.set_state(window_id, WindowState::Normal)
    }

    /// Enters fullscreen, or leaves it back to `Normal`. Leaving is a no-op for a
    /// window that is not fullscreen.
    pub fn set_fullscreen(&mut self, window_id: WindowId, fullscreen: bool) -> Result<(), WindowManagementError> {
        let state = self
            .registry
            .get(window_id)
            .map(|w| w.state())
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        if fullscreen {
            self.set_state(window_id, WindowState::Fullscreen)
        } else if state == WindowState::Fullscreen {
            self.set_state(window_id, WindowState::Normal)
        } else {
            Ok(())
        }
    }

    /// Applies a state; the layout is rebuilt since only `Normal` and `Tiled`
    /// windows take part in it.
    fn set_state(&mut self, window_id: WindowId, state: WindowState) -> Result<(), WindowManagementError> {
        let changed = self
            .transition(window_id, state)
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        if changed {
            self.relayout_active();
        }
        Ok(())
    }

    /// Applies a state and publishes the resulting events. Returns `None` for an
    /// unknown window, otherwise whether the state changed.
    fn transition(&mut self, window_id: WindowId, state: WindowState) -> Option<bool> {
        let window = self.registry.get_mut(window_id)?;
        let old_state = window.state();
        let was_visible = window.is_visible();
        if !window.set_state(state) {
            return Some(false);
        }
        let visible = window.is_visible();

        debug!("Window {} state {:?} -> {:?}", window_id, old_state, state);
        self.events.publish(WindowManagerEvent::StateChanged { window_id, old_state, new_state: state });
        if visible != was_visible {
            self.events.publish(WindowManagerEvent::VisibilityChanged { window_id, visible });
        }
        Some(true)
    }

    // --- Geometry ---

    pub fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) -> Result<(), WindowManagementError> {
        let geometry = self
            .registry
            .get(window_id)
            .map(|w| w.geometry().with_origin(x, y))
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        self.apply_geometry(window_id, geometry);
        Ok(())
    }

    pub fn resize_window(&mut self, window_id: WindowId, width: i32, height: i32) -> Result<(), WindowManagementError> {
        let current = self
            .registry
            .get(window_id)
            .map(|w| w.geometry())
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        let size = SizeInt::from_signed(width, height)
            .ok_or(WindowManagementError::InvalidGeometry { width, height })?;
        self.apply_geometry(window_id, RectInt::new(current.origin, size));
        Ok(())
    }

    /// Moves and resizes a window to a screen region and marks it `Snapped`.
    pub fn snap_window(&mut self, window_id: WindowId, position: SnapPosition) -> Result<(), WindowManagementError> {
        if !self.registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        let geometry = position.geometry(self.screen);
        debug!("Snapping window {} to {:?}: {:?}", window_id, position, geometry);
        self.apply_geometry(window_id, geometry);
        if self.transition(window_id, WindowState::Snapped) == Some(true) {
            self.relayout_active();
        }
        Ok(())
    }

    fn apply_geometry(&mut self, window_id: WindowId, geometry: RectInt) {
        if let Some(window) = self.registry.get_mut(window_id) {
            if window.set_geometry(geometry) {
                self.events.publish(WindowManagerEvent::GeometryChanged { window_id, geometry });
            }
        }
    }

    pub fn set_window_title(&mut self, window_id: WindowId, title: impl Into<String>) -> Result<(), WindowManagementError> {
        let window = self
            .registry
            .get_mut(window_id)
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        window.set_title(title.into());
        Ok(())
    }

    /// Changes the screen bounds used for snapping, stage mode and as the layout
    /// area of workspaces without their own geometry. Workspaces that covered the
    /// old screen follow the new one.
    pub fn set_screen_geometry(&mut self, screen: RectInt) -> Result<(), WindowManagementError> {
        let old_screen = self.screen;
        self.screen = screen;
        let following: Vec<WorkspaceId> = self
            .workspaces
            .all_workspaces_ordered()
            .into_iter()
            .filter(|ws| ws.geometry() == Some(old_screen))
            .map(|ws| ws.id())
            .collect();
        for workspace_id in following {
            self.workspaces.set_workspace_geometry(workspace_id, Some(screen))?;
        }
        info!("Screen geometry changed to {:?}", screen);
        self.stage.set_area(&mut self.registry, screen);
        self.relayout_active();
        Ok(())
    }

    // --- Z-order ---

    pub fn raise_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        if !self.registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        self.move_in_z_order(window_id, true);
        Ok(())
    }

    pub fn lower_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        if !self.registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        self.move_in_z_order(window_id, false);
        Ok(())
    }

    /// Moves a window to the top (`to_top`) or the bottom of the z-order.
    fn move_in_z_order(&mut self, window_id: WindowId, to_top: bool) {
        let Some(index) = self.z_order.iter().position(|id| *id == window_id) else {
            return;
        };
        let target = if to_top { self.z_order.len() - 1 } else { 0 };
        if index == target {
            return;
        }
        self.z_order.remove(index);
        if to_top {
            self.z_order.push(window_id);
        } else {
            self.z_order.insert(0, window_id);
        }
        self.events.publish(WindowManagerEvent::ZOrderChanged { window_id });
    }

    // --- Layout ---

    /// Sets the layout of `workspace_id` (the active workspace if `None`) and
    /// arranges its windows inside the workspace geometry or the screen.
    ///
    /// The engine keeps following the active workspace. An inactive workspace is
    /// arranged once here and again whenever it becomes active.
    pub fn tile_windows(
        &mut self,
        layout_name: &str,
        workspace_id: Option<WorkspaceId>,
    ) -> Result<(), WindowManagementError> {
        let layout_type: LayoutType = layout_name.parse()?;
        let workspace_id = workspace_id.unwrap_or_else(|| self.workspaces.active_workspace_id());
        self.workspaces.set_workspace_layout(workspace_id, layout_type)?;

        if workspace_id == self.workspaces.active_workspace_id() {
            info!("Applying {} layout to active workspace {}", layout_type, workspace_id);
            self.relayout_active();
        } else if !self.stage.is_active() {
            let area = self.layout_area(workspace_id);
            let windows = self.layout_candidates(workspace_id);
            info!("Applying {} layout to {} windows on workspace {}", layout_type, windows.len(), workspace_id);
            for (window_id, geometry) in arrange(layout_type, area, &windows) {
                self.apply_geometry(window_id, geometry);
            }
            self.sync_tiled_states(layout_type == LayoutType::Tiling && !area.is_empty(), &windows);
        }
        Ok(())
    }

    fn layout_area(&self, workspace_id: WorkspaceId) -> RectInt {
        self.workspaces
            .get_workspace(workspace_id)
            .and_then(|ws| ws.geometry())
            .unwrap_or(self.screen)
    }

    /// Windows of a workspace that a layout may place: `Normal` and `Tiled` ones,
    /// in creation order. Minimized, maximized, fullscreen and snapped windows
    /// keep their own geometry.
    fn layout_candidates(&self, workspace_id: WorkspaceId) -> Vec<WindowId> {
        self.workspaces
            .windows_on_workspace(workspace_id)
            .into_iter()
            .filter(|id| {
                self.registry
                    .get(*id)
                    .map_or(false, |w| matches!(w.state(), WindowState::Normal | WindowState::Tiled))
            })
            .collect()
    }

    /// Points the engine at the active workspace and recomputes its arrangement.
    /// Deferred while stage mode is active; [`exit_stage`](Self::exit_stage)
    /// catches up.
    fn relayout_active(&mut self) {
        if self.stage.is_active() {
            self.layout_pending = true;
            return;
        }
        self.layout_pending = false;

        let active = self.workspaces.active_workspace_id();
        let layout_type = self
            .workspaces
            .get_workspace(active)
            .map_or(self.layout.layout_type(), |ws| ws.layout());
        let area = self.layout_area(active);
        let windows = self.layout_candidates(active);
        self.layout.configure(&mut self.registry, layout_type, area, windows);

        let placed = self.layout.windows().to_vec();
        self.sync_tiled_states(layout_type == LayoutType::Tiling && !area.is_empty(), &placed);
    }

    fn flush_pending_layout(&mut self) {
        if self.layout_pending && !self.stage.is_active() {
            self.relayout_active();
        }
    }

    /// Windows placed by a tiling arrangement become `Tiled`; otherwise `Tiled`
    /// ones fall back to `Normal`. Other states are never touched.
    fn sync_tiled_states(&mut self, tiling: bool, windows: &[WindowId]) {
        let (from, to) = if tiling {
            (WindowState::Normal, WindowState::Tiled)
        } else {
            (WindowState::Tiled, WindowState::Normal)
        };
        for window_id in windows {
            if self.registry.get(*window_id).map(|w| w.state()) == Some(from) {
                self.transition(*window_id, to);
            }
        }
    }

    // --- Workspaces ---

    pub fn create_workspace(&mut self, name: impl Into<String>) -> WorkspaceId {
        self.workspaces.create_workspace(name)
    }

    pub fn remove_workspace(&mut self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        self.workspaces.remove_workspace(&mut self.registry, workspace_id)?;
        self.relayout_active();
        self.refocus()
    }

    /// Switches workspaces. The active window moves to the topmost visible window
    /// of the new workspace, or none.
    pub fn activate_workspace(&mut self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        if self.workspaces.active_workspace_id() == workspace_id {
            return if self.workspaces.contains_workspace(workspace_id) {
                Ok(())
            } else {
                Err(WindowManagementError::WorkspaceNotFound(workspace_id))
            };
        }
        self.switch_workspace(workspace_id)?;
        self.refocus()
    }

    fn switch_workspace(&mut self, workspace_id: WorkspaceId) -> Result<(), WindowManagementError> {
        self.workspaces.activate_workspace(&mut self.registry, workspace_id)?;
        self.relayout_active();
        Ok(())
    }

    pub fn move_window_to_workspace(
        &mut self,
        window_id: WindowId,
        workspace_id: WorkspaceId,
    ) -> Result<(), WindowManagementError> {
        let old_workspace = self.workspaces.workspace_for_window(window_id);
        self.workspaces.move_window_to_workspace(&mut self.registry, window_id, workspace_id)?;
        if old_workspace == Some(workspace_id) {
            return Ok(());
        }

        let target_tiles = self
            .workspaces
            .get_workspace(workspace_id)
            .map_or(false, |ws| ws.layout() == LayoutType::Tiling);
        if !target_tiles && self.registry.get(window_id).map(|w| w.state()) == Some(WindowState::Tiled) {
            self.transition(window_id, WindowState::Normal);
        }
        self.relayout_active();
        if self.active_window == Some(window_id) {
            self.refocus()?;
        }
        Ok(())
    }

    pub fn rename_workspace(&mut self, workspace_id: WorkspaceId, name: impl Into<String>) -> Result<(), WindowManagementError> {
        self.workspaces.rename_workspace(workspace_id, name)
    }

    /// Sets or clears a workspace's own geometry; the layout follows if that
    /// workspace is active.
    pub fn set_workspace_geometry(
        &mut self,
        workspace_id: WorkspaceId,
        geometry: Option<RectInt>,
    ) -> Result<(), WindowManagementError> {
        self.workspaces.set_workspace_geometry(workspace_id, geometry)?;
        if workspace_id == self.workspaces.active_workspace_id() {
            self.relayout_active();
        }
        Ok(())
    }

    // --- Tab groups ---

    pub fn create_group(&mut self) -> GroupId {
        self.tabs.create_group()
    }

    pub fn tab_window_into_group(&mut self, window_id: WindowId, group_id: GroupId) -> Result<(), WindowManagementError> {
        self.tabs.tab_window_into_group(&mut self.registry, window_id, group_id)?;
        self.refocus()
    }

    pub fn untab_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        self.tabs.untab_window(&mut self.registry, window_id)?;
        self.refocus()
    }

    pub fn tab_windows(&mut self, a: WindowId, b: WindowId) -> Result<GroupId, WindowManagementError> {
        let group_id = self.tabs.tab_windows(&mut self.registry, a, b)?;
        self.refocus()?;
        Ok(group_id)
    }

    /// Shows `window_id` as the active tab of its group without activating it.
    pub fn activate_window_in_group(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        self.tabs.activate_in_group(&mut self.registry, window_id)?;
        self.refocus()
    }

    // --- Stage mode ---

    /// Lays every window out in the overview grid. Layout changes made while it
    /// is active are applied on exit.
    pub fn enter_stage(&mut self) {
        self.stage.enter(&mut self.registry);
    }

    pub fn exit_stage(&mut self) {
        self.stage.exit(&mut self.registry);
        self.flush_pending_layout();
    }

    pub fn toggle_stage(&mut self) {
        self.stage.toggle(&mut self.registry);
        self.flush_pending_layout();
    }

    /// Picks a window from the overview: activates it, then leaves stage mode.
    pub fn select_stage_window(&mut self, window_id: WindowId) -> Result<(), WindowManagementError> {
        if !self.stage.is_active() {
            return Err(WindowManagementError::StageNotActive);
        }
        if !self.registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        self.activate_window(window_id)?;
        self.exit_stage();
        Ok(())
    }

    // --- Focus helpers ---

    fn is_focusable(&self, window_id: WindowId) -> bool {
        self.registry.get(window_id).map_or(false, |w| w.is_visible())
    }

    fn topmost_focusable(&self) -> Option<WindowId> {
        self.z_order.iter().rev().copied().find(|id| self.is_focusable(*id))
    }

    /// Keeps the active window if it is still visible; otherwise hands activation
    /// to the topmost visible window, or clears it.
    fn refocus(&mut self) -> Result<(), WindowManagementError> {
        match self.active_window {
            Some(id) if self.is_focusable(id) => return Ok(()),
            Some(id) => {
                if let Some(window) = self.registry.get_mut(id) {
                    window.set_active(false);
                }
                self.active_window = None;
            }
            None => {}
        }
        match self.topmost_focusable() {
            Some(next) => self.activate_window(next),
            None => {
                warn!("No visible window left to activate");
                Ok(())
            }
        }
    }

    // --- Accessors ---

    pub fn subscribe_to_events(&self) -> broadcast::Receiver<WindowManagerEvent> {
        self.events.subscribe()
    }

    pub fn event_publisher(&self) -> EventPublisher {
        self.events.clone()
    }

    pub fn get_window(&self, window_id: WindowId) -> Option<&Window> {
        self.registry.get(window_id)
    }

    /// All windows in creation order.
    pub fn all_windows(&self) -> Vec<&Window> {
        self.registry.iter().collect()
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.active_window.and_then(|id| self.registry.get(id))
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window
    }

    pub fn windows_on_workspace(&self, workspace_id: WorkspaceId) -> Vec<&Window> {
        self.workspaces
            .windows_on_workspace(workspace_id)
            .into_iter()
            .filter_map(|id| self.registry.get(id))
            .collect()
    }

    pub fn windows_by_type(&self, window_type: WindowType) -> Vec<&Window> {
        self.registry.iter().filter(|w| w.window_type() == window_type).collect()
    }

    /// Window ids from back to front.
    pub fn z_order(&self) -> &[WindowId] {
        &self.z_order
    }

    pub fn screen_geometry(&self) -> RectInt {
        self.screen
    }

    pub fn active_workspace_id(&self) -> WorkspaceId {
        self.workspaces.active_workspace_id()
    }

    pub fn workspace_manager(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    pub fn tab_manager(&self) -> &TabManager {
        &self.tabs
    }

    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn stage_manager(&self) -> &StageManager {
        &self.stage
    }

    pub fn is_stage_active(&self) -> bool {
        self.stage.is_active()
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use pretty_assertions::assert_eq;

    fn manager() -> WindowManager {
        WindowManager::with_defaults()
    }

    fn normal(wm: &mut WindowManager, title: &str) -> WindowId {
        wm.create_window(title, 10, 10, 400, 300, WindowType::Normal).unwrap()
    }

    fn drain(rx: &mut broadcast::Receiver<WindowManagerEvent>) -> Vec<WindowManagerEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn test_new_rejects_unknown_default_layout() {
        let config = WindowManagementConfig { default_layout: "spiral".to_string(), ..Default::default() };
        assert!(matches!(
            WindowManager::new(&config),
            Err(WindowManagementError::UnknownLayout(name)) if name == "spiral"
        ));
    }

    #[test]
    fn test_new_uses_config_values() {
        let config = WindowManagementConfig {
            screen_width: 1280,
            screen_height: 720,
            default_layout: "Tiling".to_string(),
            stage_padding: 8,
            ..Default::default()
        };
        let wm = WindowManager::new(&config).unwrap();
        assert_eq!(wm.screen_geometry(), RectInt::from_coords(0, 0, 1280, 720));
        assert_eq!(wm.layout_engine().layout_type(), LayoutType::Tiling);
        assert_eq!(wm.stage_manager().padding(), 8);
        assert_eq!(
            wm.workspace_manager().active_workspace().and_then(|ws| ws.geometry()),
            Some(RectInt::from_coords(0, 0, 1280, 720))
        );
    }

    #[test]
    fn test_create_window_becomes_active_only_when_none() {
        let mut wm = manager();
        let mut rx = wm.subscribe_to_events();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");

        assert_eq!(wm.active_window_id(), Some(a));
        assert!(wm.get_window(a).unwrap().is_active());
        assert!(!wm.get_window(b).unwrap().is_active());
        assert_eq!(wm.z_order(), &[a, b]);
        assert_eq!(wm.windows_on_workspace(wm.active_workspace_id()).len(), 2);

        let kinds: Vec<EventKind> = drain(&mut rx).iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::WindowCreated, EventKind::WindowActivated, EventKind::WindowCreated]);
    }

    #[test]
    fn test_create_window_rejects_negative_size() {
        let mut wm = manager();
        assert!(matches!(
            wm.create_window("bad", 0, 0, -1, 10, WindowType::Normal),
            Err(WindowManagementError::InvalidGeometry { width: -1, height: 10 })
        ));
        assert_eq!(wm.window_count(), 0);
        assert!(wm.z_order().is_empty());
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        wm.activate_window(b).unwrap();
        let mut rx = wm.subscribe_to_events();

        wm.activate_window(b).unwrap();
        assert!(drain(&mut rx).is_empty());
        assert_eq!(wm.active_window_id(), Some(b));
        assert!(!wm.get_window(a).unwrap().is_active());
    }

    #[test]
    fn test_activate_raises_and_restores_minimized() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        wm.minimize_window(a).unwrap();
        assert_eq!(wm.active_window_id(), Some(b));

        wm.activate_window(a).unwrap();
        let window = wm.get_window(a).unwrap();
        assert_eq!(window.state(), WindowState::Normal);
        assert!(window.is_visible());
        assert_eq!(wm.z_order(), &[b, a]);
    }

    #[test]
    fn test_destroy_active_prefers_window_above() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        let c = normal(&mut wm, "c");
        wm.lower_window(c).unwrap();
        assert_eq!(wm.z_order(), &[c, a, b]);

        wm.activate_window(c).unwrap();
        wm.lower_window(c).unwrap();
        // z-order [c, a, b]: the window directly above c is a.
        wm.destroy_window(c).unwrap();
        assert_eq!(wm.active_window_id(), Some(a));

        // b is on top; with nothing above it, the topmost remaining window wins.
        wm.activate_window(b).unwrap();
        wm.destroy_window(b).unwrap();
        assert_eq!(wm.active_window_id(), Some(a));

        wm.destroy_window(a).unwrap();
        assert_eq!(wm.active_window_id(), None);
        assert!(matches!(wm.destroy_window(a), Err(WindowManagementError::WindowNotFound(_))));
    }

    #[test]
    fn test_minimize_active_hands_focus_to_topmost_visible() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        let c = normal(&mut wm, "c");
        wm.activate_window(c).unwrap();
        wm.minimize_window(b).unwrap();
        assert_eq!(wm.active_window_id(), Some(c));

        wm.minimize_window(c).unwrap();
        assert_eq!(wm.active_window_id(), Some(a));
        assert!(!wm.get_window(c).unwrap().is_active());

        wm.minimize_window(a).unwrap();
        assert_eq!(wm.active_window_id(), None);
    }

    #[test]
    fn test_state_commands_publish_events() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let mut rx = wm.subscribe_to_events();

        wm.maximize_window(a).unwrap();
        wm.maximize_window(a).unwrap();
        wm.set_fullscreen(a, true).unwrap();
        wm.set_fullscreen(a, false).unwrap();
        wm.set_fullscreen(a, false).unwrap();
        assert_eq!(wm.get_window(a).unwrap().state(), WindowState::Normal);

        let changes: Vec<(WindowState, WindowState)> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                WindowManagerEvent::StateChanged { old_state, new_state, .. } => Some((old_state, new_state)),
                _ => None,
            })
            .collect();
        assert_eq!(
            changes,
            vec![
                (WindowState::Normal, WindowState::Maximized),
                (WindowState::Maximized, WindowState::Fullscreen),
                (WindowState::Fullscreen, WindowState::Normal),
            ]
        );
    }

    #[test]
    fn test_move_and_resize() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        wm.move_window(a, -20, 40).unwrap();
        wm.resize_window(a, 800, 600).unwrap();
        assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(-20, 40, 800, 600));

        assert!(matches!(
            wm.resize_window(a, 800, -1),
            Err(WindowManagementError::InvalidGeometry { .. })
        ));
        assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(-20, 40, 800, 600));
        assert!(matches!(
            wm.move_window(WindowId::new(99), 0, 0),
            Err(WindowManagementError::WindowNotFound(_))
        ));
    }

    #[test]
    fn test_snap_left_half() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        wm.snap_window(a, SnapPosition::Left).unwrap();
        let window = wm.get_window(a).unwrap();
        assert_eq!(window.geometry(), RectInt::from_coords(0, 0, 960, 1080));
        assert_eq!(window.state(), WindowState::Snapped);
    }

    #[test]
    fn test_raise_lower_publish_only_on_change() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        let mut rx = wm.subscribe_to_events();

        wm.raise_window(b).unwrap();
        wm.lower_window(a).unwrap();
        assert!(drain(&mut rx).is_empty());

        wm.raise_window(a).unwrap();
        assert_eq!(wm.z_order(), &[b, a]);
        assert_eq!(drain(&mut rx), vec![WindowManagerEvent::ZOrderChanged { window_id: a }]);
    }

    #[test]
    fn test_tile_windows_grid_and_tiled_state() {
        let mut wm = manager();
        let ids: Vec<WindowId> = (0..4).map(|i| normal(&mut wm, &format!("w{i}"))).collect();
        wm.tile_windows("tiling", None).unwrap();

        let geometries: Vec<RectInt> = ids.iter().map(|id| wm.get_window(*id).unwrap().geometry()).collect();
        assert_eq!(
            geometries,
            vec![
                RectInt::from_coords(0, 0, 960, 540),
                RectInt::from_coords(960, 0, 960, 540),
                RectInt::from_coords(0, 540, 960, 540),
                RectInt::from_coords(960, 540, 960, 540),
            ]
        );
        assert!(ids.iter().all(|id| wm.get_window(*id).unwrap().state() == WindowState::Tiled));

        // Windows created later join the arrangement.
        let e = normal(&mut wm, "e");
        assert_eq!(wm.get_window(e).unwrap().state(), WindowState::Tiled);
        assert_eq!(wm.get_window(e).unwrap().geometry().height(), 360);

        wm.tile_windows("free", None).unwrap();
        assert_eq!(wm.get_window(e).unwrap().state(), WindowState::Normal);
    }

    #[test]
    fn test_tiled_window_moved_to_free_workspace_is_normal() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        wm.tile_windows("tiling", None).unwrap();
        let other = wm.create_workspace("Other");

        wm.move_window_to_workspace(b, other).unwrap();
        assert_eq!(wm.get_window(b).unwrap().state(), WindowState::Normal);
        assert_eq!(wm.get_window(b).unwrap().geometry(), RectInt::from_coords(0, 540, 1920, 540));
        assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(0, 0, 1920, 1080));
        assert_eq!(wm.get_window(a).unwrap().state(), WindowState::Tiled);
    }

    #[test]
    fn test_tile_windows_errors() {
        let mut wm = manager();
        normal(&mut wm, "a");
        assert!(matches!(wm.tile_windows("spiral", None), Err(WindowManagementError::UnknownLayout(_))));
        assert!(matches!(
            wm.tile_windows("tiling", Some(WorkspaceId::new_v4())),
            Err(WindowManagementError::WorkspaceNotFound(_))
        ));
        assert_eq!(wm.layout_engine().layout_type(), LayoutType::Free);
    }

    #[test]
    fn test_workspace_switch_moves_focus() {
        let mut wm = manager();
        let home = wm.active_workspace_id();
        let x = normal(&mut wm, "x");
        let other = wm.create_workspace("Other");

        wm.activate_workspace(other).unwrap();
        assert_eq!(wm.active_window_id(), None);
        assert!(!wm.get_window(x).unwrap().is_visible());

        let y = normal(&mut wm, "y");
        assert_eq!(wm.active_window_id(), Some(y));

        // Activating a window on another workspace switches to it.
        wm.activate_window(x).unwrap();
        assert_eq!(wm.active_workspace_id(), home);
        assert!(wm.get_window(x).unwrap().is_visible());
        assert!(!wm.get_window(y).unwrap().is_visible());
    }

    #[test]
    fn test_move_active_window_away_refocuses() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        wm.activate_window(b).unwrap();
        let other = wm.create_workspace("Other");

        wm.move_window_to_workspace(b, other).unwrap();
        assert_eq!(wm.active_window_id(), Some(a));
        assert!(!wm.get_window(b).unwrap().is_visible());
        assert_eq!(wm.workspace_manager().workspace_for_window(b), Some(other));
    }

    #[test]
    fn test_remove_last_workspace_fails() {
        let mut wm = manager();
        let only = wm.active_workspace_id();
        normal(&mut wm, "a");
        assert!(matches!(
            wm.remove_workspace(only),
            Err(WindowManagementError::CannotRemoveLastWorkspace(_))
        ));
        assert_eq!(wm.workspace_manager().workspace_count(), 1);
        assert_eq!(wm.windows_on_workspace(only).len(), 1);
    }

    #[test]
    fn test_tab_windows_keeps_active_visible() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        wm.activate_window(b).unwrap();

        let group = wm.tab_windows(a, b).unwrap();
        assert_eq!(wm.tab_manager().get_group(group).unwrap().active_member(), Some(a));
        assert!(!wm.get_window(b).unwrap().is_visible());
        assert_eq!(wm.active_window_id(), Some(a));

        wm.activate_window(b).unwrap();
        assert!(wm.get_window(b).unwrap().is_visible());
        assert!(!wm.get_window(a).unwrap().is_visible());
        assert_eq!(wm.tab_manager().get_group(group).unwrap().active_member(), Some(b));
    }

    #[test]
    fn test_stage_select_activates_and_exits() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let b = wm.create_window("b", 500, 500, 640, 480, WindowType::Normal).unwrap();
        assert!(matches!(wm.select_stage_window(b), Err(WindowManagementError::StageNotActive)));

        wm.enter_stage();
        assert!(wm.is_stage_active());
        assert_ne!(wm.get_window(b).unwrap().geometry(), RectInt::from_coords(500, 500, 640, 480));

        wm.select_stage_window(b).unwrap();
        assert!(!wm.is_stage_active());
        assert_eq!(wm.active_window_id(), Some(b));
        assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(10, 10, 400, 300));
        assert_eq!(wm.get_window(b).unwrap().geometry(), RectInt::from_coords(500, 500, 640, 480));
    }

    #[test]
    fn test_cycle_active_window_wraps() {
        let mut wm = manager();
        assert_eq!(wm.cycle_active_window(CycleDirection::Forward).unwrap(), None);
        let a = normal(&mut wm, "a");
        let b = normal(&mut wm, "b");
        let c = normal(&mut wm, "c");
        wm.minimize_window(b).unwrap();

        assert_eq!(wm.cycle_active_window(CycleDirection::Forward).unwrap(), Some(c));
        assert_eq!(wm.cycle_active_window(CycleDirection::Forward).unwrap(), Some(a));
        assert_eq!(wm.cycle_active_window(CycleDirection::Backward).unwrap(), Some(c));
    }

    #[test]
    fn test_set_screen_geometry_updates_snap_and_workspace() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let screen = RectInt::from_coords(0, 0, 2560, 1440);
        wm.set_screen_geometry(screen).unwrap();

        assert_eq!(wm.screen_geometry(), screen);
        assert_eq!(wm.workspace_manager().active_workspace().and_then(|ws| ws.geometry()), Some(screen));
        assert_eq!(wm.stage_manager().area(), screen);
        wm.snap_window(a, SnapPosition::Right).unwrap();
        assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(1280, 0, 1280, 1440));
    }

    #[test]
    fn test_set_window_title_and_queries() {
        let mut wm = manager();
        let a = normal(&mut wm, "a");
        let d = wm.create_window("dialog", 0, 0, 100, 100, WindowType::Dialog).unwrap();
        wm.set_window_title(a, "renamed").unwrap();

        assert_eq!(wm.get_window(a).unwrap().title(), "renamed");
        assert_eq!(wm.windows_by_type(WindowType::Dialog).iter().map(|w| w.id()).collect::<Vec<_>>(), vec![d]);
        assert_eq!(wm.all_windows().len(), 2);
        assert_eq!(wm.active_window().map(|w| w.id()), Some(a));
    }
}
