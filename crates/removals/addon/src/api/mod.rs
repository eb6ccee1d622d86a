//! Host-facing protocol and error surface.
//!
//! The host framework drives an addon type through a fixed bundle of
//! callbacks and hands back a smaller bundle of its own. Both directions are
//! modelled here as plain structs of boxed closures so neither side needs
//! dynamic lookup once registration has completed.

pub mod errors;
pub mod protocol;

pub use errors::{CommandError, RegistrationError};
pub use protocol::{
    AddDisplayInfoCallback, AddonData, AddonHost, CapabilityBundle, HandlerBundle,
    InitializeCallback, KillCallback, SetDataCallback, SpawnCallback, UpdateCallback,
};
