//! Remover-zone addon for a host addon-management framework.
//!
//! This crate wires [`removals_core`] into the host's custom-addon protocol and
//! exposes the operator commands that edit zones in place. Consumers embed
//! [`RemovalsAddon`], forward host lifecycle events to it, and route the
//! `<prefix>.add|remove|radius` commands through
//! [`RemovalsAddon::handle_command`].
//!
//! Modules are organized by responsibility:
//! - [`api`] defines the capability protocol shared with the host and the error types
//! - [`adapter`] registers the addon type and owns the host's `SetData` callback
//! - [`commands`] parses operator commands and applies them to the nearest zone
//! - [`lang`] holds the reply catalog and the localization seam
//! - [`memory`] provides in-memory host services for tests and tooling
pub mod adapter;
pub mod addon;
pub mod api;
pub mod commands;
pub mod config;
pub mod lang;
pub mod memory;
pub mod services;

pub use adapter::CapabilityAdapter;
pub use addon::{CommandReply, RemovalsAddon};
pub use api::{
    AddDisplayInfoCallback, AddonData, AddonHost, CapabilityBundle, CommandError, HandlerBundle,
    InitializeCallback, KillCallback, RegistrationError, SetDataCallback, SpawnCallback,
    UpdateCallback,
};
pub use commands::{CommandDispatcher, CommandOutcome, RemoverCommand, ZoneEdit};
pub use config::AddonConfig;
pub use lang::{EnglishMessages, Localizer, MessageKey, default_messages};
pub use memory::{AimTable, InMemoryWorld, MemoryHost, PermissionSet};
pub use services::{HostServices, Invoker, PermissionOracle};
