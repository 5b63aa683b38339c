use serde::{Deserialize, Serialize};
use uuid::Uuid;

use novade_core::types::RectInt;

use crate::layout::LayoutType;

pub type WorkspaceId = Uuid;

/// A named virtual desktop.
///
/// Window membership is not stored here; the
/// [`WorkspaceManager`](super::WorkspaceManager) owns the window→workspace index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<RectInt>,
    #[serde(default)]
    layout: LayoutType,
    active: bool,
}

impl Workspace {
    pub(crate) fn new(name: String, layout: LayoutType) -> Self {
        Self { id: Uuid::new_v4(), name, geometry: None, layout, active: false }
    }

    // Getters
    pub fn id(&self) -> WorkspaceId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn geometry(&self) -> Option<RectInt> { self.geometry }
    /// Layout applied while this workspace is active.
    pub fn layout(&self) -> LayoutType { self.layout }
    pub fn is_active(&self) -> bool { self.active }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_geometry(&mut self, geometry: Option<RectInt>) {
        self.geometry = geometry;
    }

    pub(crate) fn set_layout(&mut self, layout: LayoutType) {
        self.layout = layout;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
