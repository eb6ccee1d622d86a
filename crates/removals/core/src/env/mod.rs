//! Traits describing the host simulation the zones act upon.
//!
//! The host owns physics, the spatial index, and entity lifetimes. Zones only
//! see it through [`EntityWorld`] (sphere queries and kill requests) and the
//! command path through [`AimOracle`] (ray casts from a player's eyes). Both
//! are implemented by the embedding host, or by in-memory doubles in tests.
mod aim;
mod world;

pub use aim::AimOracle;
pub use world::{EntityLayers, EntityWorld, HostEntity, SphereQuery, TriggerInteraction};
