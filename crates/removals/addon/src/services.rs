//! Host services a command needs beyond the zone registry.
use removals_core::{AimOracle, EntityWorld, PlayerId};

/// Who issued a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invoker {
    /// Server console or RCON; has no body to aim with.
    Server,
    Player(PlayerId),
}

impl Invoker {
    pub fn player(id: impl Into<String>) -> Self {
        Self::Player(PlayerId::new(id))
    }

    pub fn player_id(&self) -> Option<&PlayerId> {
        match self {
            Self::Server => None,
            Self::Player(id) => Some(id),
        }
    }
}

/// Permission subsystem of the host.
pub trait PermissionOracle {
    fn has_permission(&self, player: &PlayerId, permission: &str) -> bool;
}

/// Borrowed bundle of the host services used while handling one command.
pub struct HostServices<'a> {
    pub world: &'a mut dyn EntityWorld,
    pub aim: &'a dyn AimOracle,
    pub permissions: &'a dyn PermissionOracle,
}

impl<'a> HostServices<'a> {
    pub fn new(
        world: &'a mut dyn EntityWorld,
        aim: &'a dyn AimOracle,
        permissions: &'a dyn PermissionOracle,
    ) -> Self {
        Self {
            world,
            aim,
            permissions,
        }
    }
}
