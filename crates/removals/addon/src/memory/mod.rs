//! In-memory host services.
//!
//! These implementations stand in for the host's physics, permission, and
//! addon-framework subsystems. Tests and the scenario harness use them to
//! drive the addon end to end without a game server.
mod aim;
mod host;
mod permissions;
mod world;

pub use aim::AimTable;
pub use host::MemoryHost;
pub use permissions::PermissionSet;
pub use world::InMemoryWorld;
