use std::collections::{HashMap, HashSet};

use removals_core::PlayerId;

use crate::services::PermissionOracle;

/// Explicit per-player permission grants.
#[derive(Clone, Debug, Default)]
pub struct PermissionSet {
    grants: HashMap<PlayerId, HashSet<String>>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, player: PlayerId, permission: impl Into<String>) {
        self.grants
            .entry(player)
            .or_default()
            .insert(permission.into());
    }

    pub fn revoke(&mut self, player: &PlayerId, permission: &str) {
        if let Some(grants) = self.grants.get_mut(player) {
            grants.remove(permission);
        }
    }
}

impl PermissionOracle for PermissionSet {
    fn has_permission(&self, player: &PlayerId, permission: &str) -> bool {
        self.grants
            .get(player)
            .is_some_and(|grants| grants.contains(permission))
    }
}
