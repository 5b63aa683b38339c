use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::WindowManagementError;
use crate::events::{EventPublisher, WindowManagerEvent};
use crate::window::{WindowId, WindowRegistry};

use super::group::{GroupId, WindowGroup};

/// Creates and destroys tab groups and owns the window→group index.
///
/// Within a group only the active member is visible; the others are hidden
/// through their tab visibility flag. A group that loses its last member is
/// destroyed and announced with [`WindowManagerEvent::GroupRemoved`].
#[derive(Debug)]
pub struct TabManager {
    groups: HashMap<GroupId, WindowGroup>,
    membership: HashMap<WindowId, GroupId>,
    events: EventPublisher,
}

impl TabManager {
    pub fn new(events: EventPublisher) -> Self {
        Self { groups: HashMap::new(), membership: HashMap::new(), events }
    }

    pub fn create_group(&mut self) -> GroupId {
        let group = WindowGroup::new();
        let group_id = group.id();
        self.groups.insert(group_id, group);
        debug!("Created tab group {}", group_id);
        self.events.publish(WindowManagerEvent::GroupCreated { group_id });
        group_id
    }

    /// Adds a window to `group_id`, untabbing it from any other group first.
    ///
    /// The first member of a group becomes its active member; later members join
    /// hidden. A no-op if the window is already a member.
    pub fn tab_window_into_group(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
        group_id: GroupId,
    ) -> Result<(), WindowManagementError> {
        if !registry.contains(window_id) {
            return Err(WindowManagementError::WindowNotFound(window_id));
        }
        if !self.groups.contains_key(&group_id) {
            return Err(WindowManagementError::GroupNotFound(group_id));
        }
        match self.membership.get(&window_id).copied() {
            Some(current) if current == group_id => return Ok(()),
            Some(current) => self.detach(registry, window_id, current),
            None => {}
        }

        let became_active = match self.groups.get_mut(&group_id) {
            Some(group) => group.push(window_id),
            None => return Err(WindowManagementError::GroupNotFound(group_id)),
        };
        self.membership.insert(window_id, group_id);
        debug!("Window {} joined tab group {}", window_id, group_id);
        self.events.publish(WindowManagerEvent::GroupMembershipChanged { group_id, window_id, joined: true });

        self.set_tab_hidden(registry, window_id, !became_active);
        if became_active {
            self.events.publish(WindowManagerEvent::GroupActiveChanged { group_id, window_id: Some(window_id) });
        }
        Ok(())
    }

    /// Removes a window from its group and makes it visible again.
    pub fn untab_window(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
    ) -> Result<(), WindowManagementError> {
        let group_id = self
            .membership
            .get(&window_id)
            .copied()
            .ok_or(WindowManagementError::WindowNotGrouped(window_id))?;
        self.detach(registry, window_id, group_id);
        Ok(())
    }

    /// Tabs two windows together and returns the group they end up in.
    ///
    /// If only one of them is grouped, the other joins that group; if neither is,
    /// a new group is created with `a` active. If they are in different groups,
    /// `b` leaves its group and joins `a`'s.
    pub fn tab_windows(
        &mut self,
        registry: &mut WindowRegistry,
        a: WindowId,
        b: WindowId,
    ) -> Result<GroupId, WindowManagementError> {
        if a == b {
            return Err(WindowManagementError::SelfTab(a));
        }
        for id in [a, b] {
            if !registry.contains(id) {
                return Err(WindowManagementError::WindowNotFound(id));
            }
        }

        match (self.membership.get(&a).copied(), self.membership.get(&b).copied()) {
            (Some(group_a), Some(group_b)) if group_a == group_b => Ok(group_a),
            (Some(group_a), group_b) => {
                if let Some(group_b) = group_b {
                    debug!("Moving window {} from group {} into group {} of window {}", b, group_b, group_a, a);
                }
                self.tab_window_into_group(registry, b, group_a)?;
                Ok(group_a)
            }
            (None, Some(group_b)) => {
                self.tab_window_into_group(registry, a, group_b)?;
                Ok(group_b)
            }
            (None, None) => {
                let group_id = self.create_group();
                self.tab_window_into_group(registry, a, group_id)?;
                self.tab_window_into_group(registry, b, group_id)?;
                Ok(group_id)
            }
        }
    }

    /// Makes `window_id` the active member of its group.
    pub fn activate_in_group(
        &mut self,
        registry: &mut WindowRegistry,
        window_id: WindowId,
    ) -> Result<(), WindowManagementError> {
        let group_id = self
            .membership
            .get(&window_id)
            .copied()
            .ok_or(WindowManagementError::WindowNotGrouped(window_id))?;
        self.set_active_member(registry, group_id, window_id)
    }

    /// Sets the active member of `group_id`: it becomes visible and every other
    /// member is hidden. A no-op if it is already active.
    pub fn set_active_member(
        &mut self,
        registry: &mut WindowRegistry,
        group_id: GroupId,
        window_id: WindowId,
    ) -> Result<(), WindowManagementError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(WindowManagementError::GroupNotFound(group_id))?;
        if !group.contains(window_id) {
            return Err(WindowManagementError::NotAGroupMember { window_id, group_id });
        }
        if !group.set_active(window_id) {
            return Ok(());
        }
        let members = group.members().to_vec();

        for member in members {
            self.set_tab_hidden(registry, member, member != window_id);
        }
        debug!("Window {} is now the active tab of group {}", window_id, group_id);
        self.events.publish(WindowManagerEvent::GroupActiveChanged { group_id, window_id: Some(window_id) });
        Ok(())
    }

    /// Drops a destroyed window from its group, if any.
    pub fn remove_window(&mut self, registry: &mut WindowRegistry, window_id: WindowId) -> Option<GroupId> {
        let group_id = self.membership.get(&window_id).copied()?;
        self.detach(registry, window_id, group_id);
        Some(group_id)
    }

    fn detach(&mut self, registry: &mut WindowRegistry, window_id: WindowId, group_id: GroupId) {
        self.membership.remove(&window_id);
        let (active_changed, new_active, now_empty) = match self.groups.get_mut(&group_id) {
            Some(group) => {
                let active_changed = group.remove(window_id).unwrap_or(false);
                (active_changed, group.active_member(), group.is_empty())
            }
            None => return,
        };

        debug!("Window {} left tab group {}", window_id, group_id);
        self.events.publish(WindowManagerEvent::GroupMembershipChanged { group_id, window_id, joined: false });
        self.set_tab_hidden(registry, window_id, false);

        if active_changed {
            if let Some(next) = new_active {
                self.set_tab_hidden(registry, next, false);
            }
            self.events.publish(WindowManagerEvent::GroupActiveChanged { group_id, window_id: new_active });
        }

        if now_empty {
            self.groups.remove(&group_id);
            info!("Tab group {} is empty and was dissolved", group_id);
            self.events.publish(WindowManagerEvent::GroupRemoved { group_id });
        }
    }

    fn set_tab_hidden(&self, registry: &mut WindowRegistry, window_id: WindowId, hidden: bool) {
        if let Some(window) = registry.get_mut(window_id) {
            if window.set_hidden_by_tab(hidden) {
                self.events.publish(WindowManagerEvent::VisibilityChanged {
                    window_id,
                    visible: window.is_visible(),
                });
            }
        }
    }

    // Accessors
    pub fn group_of(&self, window_id: WindowId) -> Option<GroupId> {
        self.membership.get(&window_id).copied()
    }

    pub fn get_group(&self, group_id: GroupId) -> Option<&WindowGroup> {
        self.groups.get(&group_id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &WindowGroup> {
        self.groups.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
