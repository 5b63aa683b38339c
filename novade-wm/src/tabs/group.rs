use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::window::WindowId;

pub type GroupId = Uuid;

/// A tab group: ordered members (insertion order is tab order) of which at most
/// one is the active, visible member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGroup {
    id: GroupId,
    members: Vec<WindowId>,
    active: Option<WindowId>,
}

impl WindowGroup {
    pub(crate) fn new() -> Self {
        Self { id: Uuid::new_v4(), members: Vec::new(), active: None }
    }

    // Getters
    pub fn id(&self) -> GroupId { self.id }
    pub fn members(&self) -> &[WindowId] { &self.members }
    pub fn active_member(&self) -> Option<WindowId> { self.active }
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.members.contains(&window_id)
    }

    /// Appends a member. The first member of an empty group becomes active;
    /// returns whether that happened.
    pub(crate) fn push(&mut self, window_id: WindowId) -> bool {
        self.members.push(window_id);
        if self.active.is_none() {
            self.active = Some(window_id);
            return true;
        }
        false
    }

    /// Removes a member. If it was active, the member that followed it becomes
    /// active, or the new first member if it was last. Returns `None` if the window
    /// was not a member, otherwise whether the active member changed.
    pub(crate) fn remove(&mut self, window_id: WindowId) -> Option<bool> {
        let index = self.members.iter().position(|id| *id == window_id)?;
        self.members.remove(index);
        if self.active != Some(window_id) {
            return Some(false);
        }
        self.active = self.members.get(index).or_else(|| self.members.first()).copied();
        Some(true)
    }

    pub(crate) fn set_active(&mut self, window_id: WindowId) -> bool {
        if !self.contains(window_id) || self.active == Some(window_id) {
            return false;
        }
        self.active = Some(window_id);
        true
    }
}
