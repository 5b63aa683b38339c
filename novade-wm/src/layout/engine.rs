use tracing::{debug, info};

use novade_core::types::RectInt;

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::window::{WindowId, WindowRegistry};
use crate::workspaces::Workspace;

use super::grid::grid_cells;
use super::types::LayoutType;

/// Computes the geometry each window receives under `layout_type`.
///
/// `Free` and `Floating` produce nothing; the windows keep their geometry.
pub fn arrange(layout_type: LayoutType, area: RectInt, windows: &[WindowId]) -> Vec<(WindowId, RectInt)> {
    if !layout_type.arranges_windows() || windows.is_empty() || area.is_empty() {
        return Vec::new();
    }
    match layout_type {
        LayoutType::Free | LayoutType::Floating => Vec::new(),
        LayoutType::Tiling => windows
            .iter()
            .copied()
            .zip(grid_cells(area, windows.len(), 0))
            .collect(),
        LayoutType::Stacking | LayoutType::Tabbed => windows.iter().map(|id| (*id, area)).collect(),
    }
}

/// Arranges a set of windows inside a target area.
///
/// Holds no per-window state besides the ordered id set; every trigger recomputes
/// the whole arrangement. Ids that no longer exist in the registry are dropped on
/// the next relayout.
#[derive(Debug)]
pub struct LayoutEngine {
    layout_type: LayoutType,
    area: RectInt,
    windows: Vec<WindowId>,
    events: EventPublisher,
}

impl LayoutEngine {
    pub fn new(layout_type: LayoutType, events: EventPublisher) -> Self {
        Self { layout_type, area: RectInt::default(), windows: Vec::new(), events }
    }

    pub fn layout_type(&self) -> LayoutType { self.layout_type }
    pub fn available_area(&self) -> RectInt { self.area }
    pub fn windows(&self) -> &[WindowId] { &self.windows }

    pub fn set_layout_type(&mut self, registry: &mut WindowRegistry, layout_type: LayoutType) {
        self.update_layout_type(layout_type);
        self.relayout(registry);
    }

    /// Starts tracking `window_id` (appended in insertion order), then relayouts.
    pub fn add_window(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
    ) -> Result<(), WindowManagementError> {
        if !registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        if !self.windows.contains(&window_id) {
            self.windows.push(window_id);
        }
        self.relayout(registry);
        Ok(())
    }

    /// Stops tracking `window_id`. Returns `false` if it was not tracked.
    pub fn remove_window(&mut self, registry: &mut WindowRegistry, window_id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|id| *id != window_id);
        if self.windows.len() == before {
            return false;
        }
        self.relayout(registry);
        true
    }

    pub fn set_available_area(&mut self, registry: &mut WindowRegistry, area: RectInt) {
        self.area = area;
        self.relayout(registry);
    }

    /// Uses the workspace's geometry as the target area. A workspace without
    /// geometry yields an empty area, which disables arrangement.
    pub fn apply_to_workspace(&mut self, registry: &mut WindowRegistry, workspace: &Workspace) {
        self.set_available_area(registry, workspace.geometry().unwrap_or_default());
    }

    /// Replaces type, area and tracked set in one step with a single relayout.
    pub fn configure(
        &mut self,
        registry: &mut WindowRegistry,
        layout_type: LayoutType,
        area: RectInt,
        windows: Vec<WindowId>,
    ) {
        self.update_layout_type(layout_type);
        self.area = area;
        self.windows = windows;
        self.relayout(registry);
    }

    pub fn relayout(&mut self, registry: &mut WindowRegistry) {
        self.windows.retain(|id| registry.contains(*id));
        if self.windows.is_empty() || self.area.is_empty() {
            return;
        }

        let placements = arrange(self.layout_type, self.area, &self.windows);
        debug!(
            "Relayout ({}) of {} windows in {:?}: {} placements",
            self.layout_type,
            self.windows.len(),
            self.area,
            placements.len()
        );
        for (window_id, geometry) in placements {
            if let Some(window) = registry.get_mut(window_id) {
                if window.set_geometry(geometry) {
                    self.events.publish(WindowManagerEvent::GeometryChanged { window_id, geometry });
                }
            }
        }
    }

    fn update_layout_type(&mut self, layout_type: LayoutType) {
        if self.layout_type != layout_type {
            info!("Layout changed from {} to {}", self.layout_type, layout_type);
            self.layout_type = layout_type;
            self.events.publish(WindowManagerEvent::LayoutChanged { layout: layout_type });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::window::WindowType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const AREA: RectInt = RectInt::from_coords(0, 0, 1920, 1080);

    fn setup(count: usize) -> (WindowRegistry, Vec<WindowId>) {
        let mut registry = WindowRegistry::new();
        let ids = (0..count)
            .map(|i| registry.insert(format!("w{}", i), RectInt::from_coords(5, 5, 100, 100), WindowType::Normal))
            .collect();
        (registry, ids)
    }

    fn geometry(registry: &WindowRegistry, id: WindowId) -> RectInt {
        registry.get(id).unwrap().geometry()
    }

    #[rstest]
    #[case(1, 1920, 1080)]
    #[case(2, 1920, 540)]
    #[case(3, 1920, 360)]
    #[case(4, 960, 540)]
    #[case(5, 960, 360)]
    #[case(9, 640, 360)]
    #[case(10, 640, 270)]
    fn test_tiling_cell_sizes(#[case] count: usize, #[case] cell_w: u32, #[case] cell_h: u32) {
        let (mut registry, ids) = setup(count);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(64));
        engine.configure(&mut registry, LayoutType::Tiling, AREA, ids.clone());

        for id in &ids {
            let rect = geometry(&registry, *id);
            assert_eq!((rect.width(), rect.height()), (cell_w, cell_h));
        }
        // Row-major placement in insertion order.
        let last = geometry(&registry, *ids.last().unwrap());
        let cols = crate::layout::grid_dimensions(count).0;
        let index = count - 1;
        assert_eq!(last.x(), ((index % cols) as u32 * cell_w) as i32);
        assert_eq!(last.y(), ((index / cols) as u32 * cell_h) as i32);
    }

    #[test]
    fn test_single_window_gets_full_area() {
        let (mut registry, ids) = setup(1);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(8));
        engine.configure(&mut registry, LayoutType::Tiling, AREA, ids.clone());
        assert_eq!(geometry(&registry, ids[0]), AREA);
    }

    #[test]
    fn test_free_and_floating_leave_geometry() {
        let (mut registry, ids) = setup(3);
        for layout in [LayoutType::Free, LayoutType::Floating] {
            assert!(arrange(layout, AREA, &ids).is_empty());
            let mut engine = LayoutEngine::new(layout, EventPublisher::new(8));
            engine.configure(&mut registry, layout, AREA, ids.clone());
            for id in &ids {
                assert_eq!(geometry(&registry, *id), RectInt::from_coords(5, 5, 100, 100));
            }
        }
    }

    #[test]
    fn test_stacking_and_tabbed_share_full_area() {
        let (mut registry, ids) = setup(3);
        let mut engine = LayoutEngine::new(LayoutType::Free, EventPublisher::new(32));
        engine.configure(&mut registry, LayoutType::Stacking, AREA, ids.clone());
        assert!(ids.iter().all(|id| geometry(&registry, *id) == AREA));

        let smaller = RectInt::from_coords(100, 50, 800, 600);
        engine.configure(&mut registry, LayoutType::Tabbed, smaller, ids.clone());
        assert!(ids.iter().all(|id| geometry(&registry, *id) == smaller));
        assert_eq!(engine.available_area(), smaller);
    }

    #[test]
    fn test_relayout_noop_on_empty_area_or_set() {
        let (mut registry, ids) = setup(2);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(8));
        engine.configure(&mut registry, LayoutType::Tiling, RectInt::default(), ids.clone());
        assert_eq!(geometry(&registry, ids[0]), RectInt::from_coords(5, 5, 100, 100));

        engine.configure(&mut registry, LayoutType::Tiling, AREA, Vec::new());
        assert!(engine.windows().is_empty());
        assert_eq!(geometry(&registry, ids[1]), RectInt::from_coords(5, 5, 100, 100));
    }

    #[test]
    fn test_incremental_operations() {
        let (mut registry, ids) = setup(2);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(32));
        engine.set_available_area(&mut registry, AREA);
        engine.add_window(&mut registry, ids[0]).unwrap();
        assert_eq!(geometry(&registry, ids[0]), AREA);

        engine.add_window(&mut registry, ids[1]).unwrap();
        engine.add_window(&mut registry, ids[1]).unwrap();
        assert_eq!(engine.windows(), ids.as_slice());
        assert_eq!(geometry(&registry, ids[1]), RectInt::from_coords(0, 540, 1920, 540));

        assert!(engine.remove_window(&mut registry, ids[1]));
        assert!(!engine.remove_window(&mut registry, ids[1]));
        assert_eq!(geometry(&registry, ids[0]), AREA);

        engine.set_layout_type(&mut registry, LayoutType::Free);
        engine.set_available_area(&mut registry, RectInt::from_coords(0, 0, 800, 600));
        assert_eq!(geometry(&registry, ids[0]), AREA);

        match engine.add_window(&mut registry, WindowId::new(99)) {
            Err(WindowManagementError::WindowNotFound(id)) => assert_eq!(id, WindowId::new(99)),
            other => panic!("Expected WindowNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_to_workspace_uses_its_geometry() {
        let (mut registry, ids) = setup(1);
        let mut engine = LayoutEngine::new(LayoutType::Stacking, EventPublisher::new(8));
        engine.add_window(&mut registry, ids[0]).unwrap();

        let mut workspace = Workspace::new("Code".to_string(), LayoutType::Stacking);
        workspace.set_geometry(Some(RectInt::from_coords(0, 32, 1920, 1048)));
        engine.apply_to_workspace(&mut registry, &workspace);
        assert_eq!(geometry(&registry, ids[0]), RectInt::from_coords(0, 32, 1920, 1048));
    }

    #[test]
    fn test_smaller_set_fills_the_area() {
        let (mut registry, ids) = setup(2);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(32));
        engine.configure(&mut registry, LayoutType::Tiling, AREA, ids.clone());
        assert_eq!(geometry(&registry, ids[0]), RectInt::from_coords(0, 0, 1920, 540));

        engine.configure(&mut registry, LayoutType::Tiling, AREA, vec![ids[0]]);
        assert_eq!(geometry(&registry, ids[0]), AREA);
        assert_eq!(geometry(&registry, ids[1]), RectInt::from_coords(0, 540, 1920, 540));
    }

    #[test]
    fn test_stale_ids_are_pruned() {
        let (mut registry, ids) = setup(2);
        let mut engine = LayoutEngine::new(LayoutType::Tiling, EventPublisher::new(32));
        engine.configure(&mut registry, LayoutType::Tiling, AREA, ids.clone());

        registry.remove(ids[1]);
        engine.relayout(&mut registry);
        assert_eq!(engine.windows(), &[ids[0]]);
        assert_eq!(geometry(&registry, ids[0]), AREA);
    }

    #[test]
    fn test_events_published_for_changes_only() {
        let (mut registry, ids) = setup(1);
        let events = EventPublisher::new(32);
        let mut rx = events.subscribe();
        let mut engine = LayoutEngine::new(LayoutType::Free, events);

        engine.configure(&mut registry, LayoutType::Stacking, AREA, ids.clone());
        assert_eq!(rx.try_recv().unwrap().kind(), EventKind::LayoutChanged);
        assert_eq!(rx.try_recv().unwrap().kind(), EventKind::GeometryChanged);

        // Same arrangement again: no events.
        engine.relayout(&mut registry);
        engine.configure(&mut registry, LayoutType::Stacking, AREA, ids.clone());
        assert!(rx.try_recv().is_err());
    }
}
