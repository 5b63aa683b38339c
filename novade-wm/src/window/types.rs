use std::fmt;

use serde::{Deserialize, Serialize};

use novade_core::types::RectInt;

/// Opaque window identifier.
///
/// Ids are handed out monotonically by the [`WindowRegistry`](super::WindowRegistry)
/// and never reused, so a stale id can never alias a newer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowType {
    #[default]
    Normal,
    Dialog,
    Popup,
    Utility,
    Splash,
    Notification,
    Dock,
    Desktop,
    Menu,
}

/// The single state a window is in at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
    Fullscreen,
    Tiled,
    Snapped,
}

/// A managed top-level window.
///
/// Visibility is derived from three independent sources: the `Minimized` state,
/// hiding by an inactive workspace, and hiding as a non-active tab. The window is
/// visible only when none of them applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    id: WindowId,
    title: String,
    geometry: RectInt,
    window_type: WindowType,
    state: WindowState,
    active: bool,
    visible: bool,
    #[serde(skip)]
    hidden_by_workspace: bool,
    #[serde(skip)]
    hidden_by_tab: bool,
}

impl Window {
    pub(crate) fn new(id: WindowId, title: String, geometry: RectInt, window_type: WindowType) -> Self {
        Self {
            id,
            title,
            geometry,
            window_type,
            state: WindowState::Normal,
            active: false,
            visible: true,
            hidden_by_workspace: false,
            hidden_by_tab: false,
        }
    }

    // Getters
    pub fn id(&self) -> WindowId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn geometry(&self) -> RectInt { self.geometry }
    pub fn window_type(&self) -> WindowType { self.window_type }
    pub fn state(&self) -> WindowState { self.state }
    pub fn is_active(&self) -> bool { self.active }
    pub fn is_visible(&self) -> bool { self.visible }
    pub fn is_minimized(&self) -> bool { self.state == WindowState::Minimized }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Returns `true` if the geometry actually changed.
    pub(crate) fn set_geometry(&mut self, geometry: RectInt) -> bool {
        if self.geometry == geometry {
            return false;
        }
        self.geometry = geometry;
        true
    }

    /// Returns `true` if the state actually changed. Visibility is refreshed;
    /// callers compare `is_visible()` before and after to detect a flip.
    pub(crate) fn set_state(&mut self, state: WindowState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        self.refresh_visibility();
        true
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns `true` if the window's visibility flipped.
    pub(crate) fn set_hidden_by_workspace(&mut self, hidden: bool) -> bool {
        self.hidden_by_workspace = hidden;
        self.refresh_visibility()
    }

    /// Returns `true` if the window's visibility flipped.
    pub(crate) fn set_hidden_by_tab(&mut self, hidden: bool) -> bool {
        self.hidden_by_tab = hidden;
        self.refresh_visibility()
    }

    pub fn is_hidden_by_workspace(&self) -> bool { self.hidden_by_workspace }
    pub fn is_hidden_by_tab(&self) -> bool { self.hidden_by_tab }

    fn refresh_visibility(&mut self) -> bool {
        let visible = !self.is_minimized() && !self.hidden_by_workspace && !self.hidden_by_tab;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }
}
