//! Remover-zone model and algorithms shared by the addon and tooling.
//!
//! `removals-core` defines the zone configuration ([`ZoneData`]), the
//! positioned zone that applies it ([`RemovalZone`]), and the process-scoped
//! [`ZoneRegistry`] with nearest-zone lookup. Everything the zone needs from
//! the simulation (spatial queries, entity destruction, aim resolution) is
//! reached through the traits in [`env`], so the crate stays free of host
//! coupling and can be exercised entirely in memory.
pub mod config;
pub mod data;
pub mod env;
pub mod error;
pub mod registry;
pub mod types;
pub mod zone;

pub use config::ZoneConfig;
pub use data::{ZoneData, ZoneDataError, normalize_prefab, parse_radius};
pub use env::{AimOracle, EntityLayers, EntityWorld, HostEntity, SphereQuery, TriggerInteraction};
pub use error::{AddonError, ErrorSeverity};
pub use registry::{NearestZone, ZoneRegistry};
pub use types::{EntityId, PlayerId, Position, Rotation, ZoneHandle};
pub use zone::{RecomputeReport, RemovalZone};
