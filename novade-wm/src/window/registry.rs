use std::collections::BTreeMap;

use novade_core::types::RectInt;

use super::types::{Window, WindowId, WindowType};

/// Arena owning every live [`Window`], keyed by [`WindowId`].
///
/// This is the authoritative source for window existence. Other components only
/// store ids and look them up here again before acting on them.
#[derive(Debug)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, Window>,
    next_id: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self { windows: BTreeMap::new(), next_id: 1 }
    }

    /// Allocates a fresh id and inserts a new window under it.
    pub fn insert(&mut self, title: impl Into<String>, geometry: RectInt, window_type: WindowType) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id += 1;
        self.windows.insert(id, Window::new(id, title.into(), geometry, window_type));
        id
    }

    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        self.windows.remove(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Iterates windows in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut registry = WindowRegistry::new();
        let a = registry.insert("a", RectInt::default(), WindowType::Normal);
        let b = registry.insert("b", RectInt::default(), WindowType::Dialog);
        assert!(b > a);

        assert!(registry.remove(b).is_some());
        let c = registry.insert("c", RectInt::default(), WindowType::Normal);
        assert!(c > b, "removed id must not be handed out again");
        assert!(!registry.contains(b));
        let ids: Vec<WindowId> = registry.iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_get_and_remove_unknown() {
        let mut registry = WindowRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get(WindowId::new(99)).is_none());
        assert!(registry.remove(WindowId::new(99)).is_none());

        let id = registry.insert("editor", RectInt::from_coords(5, 5, 100, 100), WindowType::Utility);
        let window = registry.get(id).unwrap();
        assert_eq!(window.title(), "editor");
        assert_eq!(window.window_type(), WindowType::Utility);
        assert_eq!(registry.len(), 1);
    }
}
