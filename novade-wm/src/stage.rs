//! Overview ("stage") mode.
//!
//! Entering stage mode snapshots the geometry of every window and lays all of them
//! out in a padded grid; exiting restores the snapshots exactly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use novade_core::types::RectInt;

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::layout::grid_cells;
use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StageState {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug)]
pub struct StageManager {
    state: StageState,
    area: RectInt,
    padding: u32,
    /// Pre-stage geometry, keyed (and therefore grid-ordered) by window id.
    snapshots: BTreeMap<WindowId, RectInt>,
    placements: BTreeMap<WindowId, RectInt>,
    events: EventPublisher,
}

impl StageManager {
    pub fn new(area: RectInt, padding: u32, events: EventPublisher) -> Self {
        Self {
            state: StageState::Inactive,
            area,
            padding,
            snapshots: BTreeMap::new(),
            placements: BTreeMap::new(),
            events,
        }
    }

    pub fn state(&self) -> StageState { self.state }
    pub fn is_active(&self) -> bool { self.state == StageState::Active }
    pub fn area(&self) -> RectInt { self.area }
    pub fn padding(&self) -> u32 { self.padding }

    /// The geometry a window had before stage mode, while it is active.
    pub fn snapshot(&self, window_id: WindowId) -> Option<RectInt> {
        self.snapshots.get(&window_id).copied()
    }

    /// The grid cell assigned to a window, while stage mode is active.
    pub fn stage_position(&self, window_id: WindowId) -> Option<RectInt> {
        self.placements.get(&window_id).copied()
    }

    /// Snapshots every registered window and arranges all of them in the grid.
    /// A no-op if stage mode is already active.
    pub fn enter(&mut self, registry: &mut WindowRegistry) {
        if self.is_active() {
            return;
        }
        self.snapshots = registry.iter().map(|w| (w.id(), w.geometry())).collect();
        self.state = StageState::Active;
        info!("Entering stage mode with {} windows", self.snapshots.len());
        self.events.publish(WindowManagerEvent::StageEntered);
        self.recompute(registry);
    }

    /// Restores every snapshotted window that still exists, then clears the
    /// snapshots. A no-op if stage mode is not active.
    pub fn exit(&mut self, registry: &mut WindowRegistry) {
        if !self.is_active() {
            return;
        }
        let snapshots = std::mem::take(&mut self.snapshots);
        self.placements.clear();
        for (window_id, geometry) in snapshots {
            if let Some(window) = registry.get_mut(window_id) {
                if window.set_geometry(geometry) {
                    self.events.publish(WindowManagerEvent::GeometryChanged { window_id, geometry });
                }
            }
        }
        self.state = StageState::Inactive;
        info!("Exited stage mode");
        self.events.publish(WindowManagerEvent::StageExited);
    }

    pub fn toggle(&mut self, registry: &mut WindowRegistry) {
        if self.is_active() {
            self.exit(registry);
        } else {
            self.enter(registry);
        }
    }

    /// Includes a window created while stage mode is active: its current geometry
    /// is snapshotted and the whole grid is recomputed. Ignored while inactive.
    pub fn add_window(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
    ) -> Result<(), WindowManagementError> {
        let geometry = registry
            .get(window_id)
            .map(|w| w.geometry())
            .ok_or(WindowManagementError::WindowNotFound(window_id))?;
        if !self.is_active() || self.snapshots.contains_key(&window_id) {
            return Ok(());
        }
        self.snapshots.insert(window_id, geometry);
        debug!("Window {} joined the stage", window_id);
        self.recompute(registry);
        Ok(())
    }

    /// Drops a window's snapshot and cell, letting the others close the gap.
    pub fn remove_window(&mut self, registry: &mut WindowRegistry, window_id: WindowId) -> bool {
        if self.snapshots.remove(&window_id).is_none() {
            return false;
        }
        self.placements.remove(&window_id);
        debug!("Window {} left the stage", window_id);
        self.recompute(registry);
        true
    }

    /// Changes the stage area, re-arranging the grid if active.
    pub fn set_area(&mut self, registry: &mut WindowRegistry, area: RectInt) {
        self.area = area;
        if self.is_active() {
            self.recompute(registry);
        }
    }

    fn recompute(&mut self, registry: &mut WindowRegistry) {
        self.snapshots.retain(|id, _| registry.contains(*id));
        let ids: Vec<WindowId> = self.snapshots.keys().copied().collect();
        let cells = grid_cells(self.area, ids.len(), self.padding);

        self.placements = ids.iter().copied().zip(cells).collect();
        for (window_id, geometry) in &self.placements {
            if let Some(window) = registry.get_mut(*window_id) {
                if window.set_geometry(*geometry) {
                    self.events.publish(WindowManagerEvent::GeometryChanged {
                        window_id: *window_id,
                        geometry: *geometry,
                    });
                }
            }
        }
    }
}
