use std::collections::HashMap;

use tracing::{debug, info, warn};

use novade_core::types::RectInt;

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::layout::LayoutType;
use crate::window::{WindowId, WindowRegistry};

use super::workspace::{Workspace, WorkspaceId};

/// Owns all workspaces, the window→workspace index and the active workspace.
///
/// Exactly one workspace is active at any time, and there is always at least one
/// workspace. Windows assigned to inactive workspaces are hidden through their
/// workspace visibility flag, independent of their `WindowState`.
#[derive(Debug)]
pub struct WorkspaceManager {
    workspaces: HashMap<WorkspaceId, Workspace>,
    ordered_workspace_ids: Vec<WorkspaceId>,
    active_workspace_id: WorkspaceId,
    assignments: HashMap<WindowId, WorkspaceId>,
    next_workspace_number: u32,
    default_layout: LayoutType,
    events: EventPublisher,
}

impl WorkspaceManager {
    /// Creates the manager with its default workspace, which starts active.
    /// Every workspace starts out with `default_layout`.
    pub fn new(
        default_name: impl Into<String>,
        geometry: Option<RectInt>,
        default_layout: LayoutType,
        events: EventPublisher,
    ) -> Self {
        let mut manager = Self {
            workspaces: HashMap::new(),
            ordered_workspace_ids: Vec::new(),
            active_workspace_id: WorkspaceId::nil(),
            assignments: HashMap::new(),
            next_workspace_number: 1,
            default_layout,
            events,
        };
        let default_id = manager.create_workspace(default_name);
        if let Some(ws) = manager.workspaces.get_mut(&default_id) {
            ws.set_geometry(geometry);
            ws.set_active(true);
        }
        manager.active_workspace_id = default_id;
        manager
    }

    /// Creates a new, inactive workspace without geometry. A blank name is
    /// replaced by the first free "Workspace N".
    pub fn create_workspace(&mut self, name: impl Into<String>) -> WorkspaceId {
        let name = name.into();
        let name = if name.trim().is_empty() { self.generate_name() } else { name };

        let workspace = Workspace::new(name.clone(), self.default_layout);
        let id = workspace.id();
        self.workspaces.insert(id, workspace);
        self.ordered_workspace_ids.push(id);

        info!("Created workspace '{}' ({})", name, id);
        self.events.publish(WindowManagerEvent::WorkspaceCreated { workspace_id: id, name });
        id
    }

    fn generate_name(&mut self) -> String {
        let mut num_to_try = self.next_workspace_number;
        loop {
            let potential_name = format!("Workspace {}", num_to_try);
            if !self.workspaces.values().any(|ws| ws.name() == potential_name) {
                self.next_workspace_number = num_to_try + 1;
                break potential_name;
            }
            num_to_try += 1;
        }
    }

    /// Removes a workspace, moving its windows to the workspace that is active
    /// afterwards. Removing the active workspace first activates the next one in
    /// creation order, or the previous one if it was last.
    pub fn remove_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        id: WorkspaceId,
    ) -> Result<(), WindowManagementError> {
        let index = self
            .ordered_workspace_ids
            .iter()
            .position(|ws_id| *ws_id == id)
            .ok_or(WindowManagementError::WorkspaceNotFound(id))?;
        if self.ordered_workspace_ids.len() <= 1 {
            warn!("Refusing to remove the last workspace {}", id);
            return Err(WindowManagementError::CannotRemoveLastWorkspace(id));
        }

        let was_active = id == self.active_workspace_id;
        let target = if was_active {
            let adjacent = self
                .ordered_workspace_ids
                .get(index + 1)
                .or_else(|| index.checked_sub(1).and_then(|i| self.ordered_workspace_ids.get(i)))
                .copied();
            match adjacent {
                Some(adjacent) => adjacent,
                None => return Err(WindowManagementError::CannotRemoveLastWorkspace(id)),
            }
        } else {
            self.active_workspace_id
        };

        for window_id in self.windows_on_workspace(id) {
            self.assignments.insert(window_id, target);
            self.events.publish(WindowManagerEvent::WindowWorkspaceChanged {
                window_id,
                old_workspace: Some(id),
                new_workspace: target,
            });
            self.set_window_hidden(registry, window_id, false);
        }

        if was_active {
            self.switch_active(registry, target);
        }

        self.workspaces.remove(&id);
        self.ordered_workspace_ids.remove(index);
        info!("Removed workspace {}", id);
        self.events.publish(WindowManagerEvent::WorkspaceRemoved { workspace_id: id });
        Ok(())
    }

    /// Makes `id` the active workspace, hiding the windows of the previous one and
    /// showing its own. A no-op if it is already active.
    pub fn activate_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        id: WorkspaceId,
    ) -> Result<(), WindowManagementError> {
        if !self.workspaces.contains_key(&id) {
            return Err(WindowManagementError::WorkspaceNotFound(id));
        }
        if id == self.active_workspace_id {
            return Ok(());
        }
        self.switch_active(registry, id);
        Ok(())
    }

    fn switch_active(&mut self, registry: &mut WindowRegistry, id: WorkspaceId) {
        let previous = self.active_workspace_id;
        for window_id in self.windows_on_workspace(previous) {
            self.set_window_hidden(registry, window_id, true);
        }
        for window_id in self.windows_on_workspace(id) {
            self.set_window_hidden(registry, window_id, false);
        }

        if let Some(ws) = self.workspaces.get_mut(&previous) {
            ws.set_active(false);
        }
        if let Some(ws) = self.workspaces.get_mut(&id) {
            ws.set_active(true);
        }
        self.active_workspace_id = id;

        info!("Switched active workspace from {} to {}", previous, id);
        self.events.publish(WindowManagerEvent::WorkspaceActivated {
            workspace_id: id,
            previous: Some(previous),
        });
    }

    /// Reassigns a window, updating its visibility to match whether the target
    /// workspace is active. A no-op if it is already assigned there.
    pub fn move_window_to_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
        id: WorkspaceId,
    ) -> Result<(), WindowManagementError> {
        if !registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        if !self.workspaces.contains_key(&id) {
            return Err(WindowManagementError::WorkspaceNotFound(id));
        }
        let old_workspace = self.assignments.get(&window_id).copied();
        if old_workspace == Some(id) {
            return Ok(());
        }

        self.assignments.insert(window_id, id);
        debug!("Moved window {} from {:?} to workspace {}", window_id, old_workspace, id);
        self.events.publish(WindowManagerEvent::WindowWorkspaceChanged {
            window_id,
            old_workspace,
            new_workspace: id,
        });
        self.set_window_hidden(registry, window_id, id != self.active_workspace_id);
        Ok(())
    }

    /// Default assignment for a newly created window: the active workspace.
    pub fn assign_window_to_active_workspace(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
    ) -> Result<WorkspaceId, WindowManagementError> {
        let active = self.active_workspace_id;
        if self.assignments.contains_key(&window_id) {
            self.move_window_to_workspace(registry, window_id, active)?;
            return Ok(active);
        }
        if !registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        self.assignments.insert(window_id, active);
        self.set_window_hidden(registry, window_id, false);
        Ok(active)
    }

    /// Drops the index entry of a destroyed window.
    pub fn remove_window(&mut self, window_id: WindowId) -> Option<WorkspaceId> {
        self.assignments.remove(&window_id)
    }

    pub fn rename_workspace(&mut self, id: WorkspaceId, name: impl Into<String>) -> Result<(), WindowManagementError> {
        let name = name.into();
        let workspace = self
            .workspaces
            .get_mut(&id)
            .ok_or(WindowManagementError::WorkspaceNotFound(id))?;
        if name.trim().is_empty() {
            return Err(WindowManagementError::EmptyWorkspaceName);
        }
        workspace.rename(name);
        Ok(())
    }

    pub fn set_workspace_geometry(
        &mut self,
        id: WorkspaceId,
        geometry: Option<RectInt>,
    ) -> Result<(), WindowManagementError> {
        let workspace = self
            .workspaces
            .get_mut(&id)
            .ok_or(WindowManagementError::WorkspaceNotFound(id))?;
        workspace.set_geometry(geometry);
        Ok(())
    }

    pub fn set_workspace_layout(&mut self, id: WorkspaceId, layout: LayoutType) -> Result<(), WindowManagementError> {
        let workspace = self
            .workspaces
            .get_mut(&id)
            .ok_or(WindowManagementError::WorkspaceNotFound(id))?;
        if workspace.layout() != layout {
            debug!("Workspace {} layout {} -> {}", id, workspace.layout(), layout);
            workspace.set_layout(layout);
        }
        Ok(())
    }

    fn set_window_hidden(&self, registry: &mut WindowRegistry, window_id: WindowId, hidden: bool) {
        if let Some(window) = registry.get_mut(window_id) {
            if window.set_hidden_by_workspace(hidden) {
                self.events.publish(WindowManagerEvent::VisibilityChanged {
                    window_id,
                    visible: window.is_visible(),
                });
            }
        }
    }

    // Accessors
    pub fn active_workspace_id(&self) -> WorkspaceId { self.active_workspace_id }

    pub fn active_workspace(&self) -> Option<&Workspace> {
        self.workspaces.get(&self.active_workspace_id)
    }

    pub fn get_workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.get(&id)
    }

    pub fn contains_workspace(&self, id: WorkspaceId) -> bool {
        self.workspaces.contains_key(&id)
    }

    /// All workspaces in creation order.
    pub fn all_workspaces_ordered(&self) -> Vec<&Workspace> {
        self.ordered_workspace_ids
            .iter()
            .filter_map(|id| self.workspaces.get(id))
            .collect()
    }

    pub fn workspace_count(&self) -> usize {
        self.ordered_workspace_ids.len()
    }

    pub fn workspace_for_window(&self, window_id: WindowId) -> Option<WorkspaceId> {
        self.assignments.get(&window_id).copied()
    }

    /// Ids of the windows assigned to `id`, in creation order.
    pub fn windows_on_workspace(&self, id: WorkspaceId) -> Vec<WindowId> {
        let mut windows: Vec<WindowId> = self
            .assignments
            .iter()
            .filter(|(_, ws)| **ws == id)
            .map(|(window_id, _)| *window_id)
            .collect();
        windows.sort();
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::window::WindowType;
    use pretty_assertions::assert_eq;

    fn setup() -> (WorkspaceManager, WindowRegistry) {
        let screen = RectInt::from_coords(0, 0, 1920, 1080);
        (
            WorkspaceManager::new("Workspace 1", Some(screen), LayoutType::Free, EventPublisher::new(64)),
            WindowRegistry::new(),
        )
    }

    fn new_window(manager: &mut WorkspaceManager, registry: &mut WindowRegistry) -> WindowId {
        let id = registry.insert("win", RectInt::from_coords(0, 0, 100, 100), WindowType::Normal);
        manager.assign_window_to_active_workspace(registry, id).unwrap();
        id
    }

    fn visible(registry: &WindowRegistry, id: WindowId) -> bool {
        registry.get(id).unwrap().is_visible()
    }

    #[test]
    fn test_default_workspace_is_active_with_geometry() {
        let (manager, _) = setup();
        assert_eq!(manager.workspace_count(), 1);
        let ws = manager.active_workspace().unwrap();
        assert_eq!(ws.name(), "Workspace 1");
        assert!(ws.is_active());
        assert_eq!(ws.geometry(), Some(RectInt::from_coords(0, 0, 1920, 1080)));
    }

    #[test]
    fn test_create_workspace_auto_names() {
        let (mut manager, _) = setup();
        let w2 = manager.create_workspace("");
        let w3 = manager.create_workspace("Music");
        let w4 = manager.create_workspace("  ");
        assert_eq!(manager.get_workspace(w2).unwrap().name(), "Workspace 2");
        assert_eq!(manager.get_workspace(w3).unwrap().name(), "Music");
        assert_eq!(manager.get_workspace(w4).unwrap().name(), "Workspace 3");

        let new_ws = manager.get_workspace(w3).unwrap();
        assert!(!new_ws.is_active());
        assert_eq!(new_ws.geometry(), None);
        assert!(manager.windows_on_workspace(w3).is_empty());

        let names: Vec<&str> = manager.all_workspaces_ordered().into_iter().map(|ws| ws.name()).collect();
        assert_eq!(names, vec!["Workspace 1", "Workspace 2", "Music", "Workspace 3"]);
    }

    #[test]
    fn test_remove_last_workspace_fails_without_change() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let win = new_window(&mut manager, &mut registry);

        match manager.remove_workspace(&mut registry, w1) {
            Err(WindowManagementError::CannotRemoveLastWorkspace(id)) => assert_eq!(id, w1),
            other => panic!("Expected CannotRemoveLastWorkspace, got {:?}", other),
        }
        assert_eq!(manager.workspace_count(), 1);
        assert_eq!(manager.active_workspace_id(), w1);
        assert_eq!(manager.workspace_for_window(win), Some(w1));
        assert!(visible(&registry, win));
    }

    #[test]
    fn test_remove_unknown_workspace() {
        let (mut manager, mut registry) = setup();
        let unknown = WorkspaceId::new_v4();
        assert!(matches!(
            manager.remove_workspace(&mut registry, unknown),
            Err(WindowManagementError::WorkspaceNotFound(_))
        ));
    }

    #[test]
    fn test_remove_active_workspace_activates_next_then_previous() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let w2 = manager.create_workspace("two");
        let w3 = manager.create_workspace("three");
        let win = new_window(&mut manager, &mut registry);

        manager.remove_workspace(&mut registry, w1).unwrap();
        assert_eq!(manager.active_workspace_id(), w2);
        assert_eq!(manager.workspace_for_window(win), Some(w2));
        assert!(visible(&registry, win));

        manager.activate_workspace(&mut registry, w3).unwrap();
        assert!(!visible(&registry, win));
        manager.remove_workspace(&mut registry, w3).unwrap();
        assert_eq!(manager.active_workspace_id(), w2, "last in order falls back to previous");
        assert!(visible(&registry, win));
    }

    #[test]
    fn test_remove_inactive_workspace_moves_windows_to_active() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let w2 = manager.create_workspace("two");
        let win = new_window(&mut manager, &mut registry);
        manager.move_window_to_workspace(&mut registry, win, w2).unwrap();
        assert!(!visible(&registry, win));

        manager.remove_workspace(&mut registry, w2).unwrap();
        assert_eq!(manager.active_workspace_id(), w1);
        assert_eq!(manager.workspace_for_window(win), Some(w1));
        assert!(visible(&registry, win));
        assert!(manager.get_workspace(w2).is_none());
    }

    #[test]
    fn test_move_then_activate_scenario() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let w2 = manager.create_workspace("W2");
        let x = new_window(&mut manager, &mut registry);
        assert_eq!(manager.workspace_for_window(x), Some(w1));
        assert!(visible(&registry, x));

        manager.move_window_to_workspace(&mut registry, x, w2).unwrap();
        assert!(!visible(&registry, x));
        assert_eq!(manager.active_workspace_id(), w1);

        manager.activate_workspace(&mut registry, w2).unwrap();
        assert!(visible(&registry, x));
        assert!(manager.get_workspace(w2).unwrap().is_active());
        assert!(!manager.get_workspace(w1).unwrap().is_active());
    }

    #[test]
    fn test_move_window_noop_and_errors() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let win = new_window(&mut manager, &mut registry);
        let mut rx = manager.events.subscribe();

        manager.move_window_to_workspace(&mut registry, win, w1).unwrap();
        assert!(rx.try_recv().is_err(), "no-op must not publish");

        assert!(matches!(
            manager.move_window_to_workspace(&mut registry, WindowId::new(999), w1),
            Err(WindowManagementError::WindowNotFound(_))
        ));
        assert!(matches!(
            manager.move_window_to_workspace(&mut registry, win, WorkspaceId::new_v4()),
            Err(WindowManagementError::WorkspaceNotFound(_))
        ));
    }

    #[test]
    fn test_activate_workspace_events() {
        let (mut manager, mut registry) = setup();
        let w2 = manager.create_workspace("two");
        let win = new_window(&mut manager, &mut registry);
        let mut rx = manager.events.subscribe();

        manager.activate_workspace(&mut registry, w2).unwrap();
        let first = rx.try_recv().unwrap();
        assert_eq!(first, WindowManagerEvent::VisibilityChanged { window_id: win, visible: false });
        assert_eq!(rx.try_recv().unwrap().kind(), EventKind::WorkspaceActivated);

        // Already active: nothing happens.
        manager.activate_workspace(&mut registry, w2).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_rename_and_geometry() {
        let (mut manager, _) = setup();
        let w2 = manager.create_workspace("two");
        manager.rename_workspace(w2, "Chat").unwrap();
        assert_eq!(manager.get_workspace(w2).unwrap().name(), "Chat");
        assert!(matches!(manager.rename_workspace(w2, " "), Err(WindowManagementError::EmptyWorkspaceName)));

        let rect = RectInt::from_coords(0, 0, 1280, 720);
        manager.set_workspace_geometry(w2, Some(rect)).unwrap();
        assert_eq!(manager.get_workspace(w2).unwrap().geometry(), Some(rect));
    }

    #[test]
    fn test_layout_is_per_workspace() {
        let screen = RectInt::from_coords(0, 0, 1920, 1080);
        let mut manager = WorkspaceManager::new("Main", Some(screen), LayoutType::Stacking, EventPublisher::new(8));
        let main = manager.active_workspace_id();
        let w2 = manager.create_workspace("two");
        assert_eq!(manager.get_workspace(w2).unwrap().layout(), LayoutType::Stacking);

        manager.set_workspace_layout(w2, LayoutType::Tiling).unwrap();
        assert_eq!(manager.get_workspace(w2).unwrap().layout(), LayoutType::Tiling);
        assert_eq!(manager.get_workspace(main).unwrap().layout(), LayoutType::Stacking);
        assert!(matches!(
            manager.set_workspace_layout(WorkspaceId::new_v4(), LayoutType::Free),
            Err(WindowManagementError::WorkspaceNotFound(_))
        ));
    }

    #[test]
    fn test_remove_window_drops_index() {
        let (mut manager, mut registry) = setup();
        let w1 = manager.active_workspace_id();
        let win = new_window(&mut manager, &mut registry);
        assert_eq!(manager.remove_window(win), Some(w1));
        assert_eq!(manager.workspace_for_window(win), None);
        assert!(manager.windows_on_workspace(w1).is_empty());
    }
}
