//! Process-scoped collection of live zones.
//!
//! The registry is the single owner of every [`RemovalZone`]. A zone is
//! inserted exactly once when the host spawns it and removed exactly once when
//! the host kills it; handles are never reused, so a stale handle can only
//! miss, never alias a newer zone.
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::data::ZoneData;
use crate::env::EntityWorld;
use crate::types::{Position, ZoneHandle};
use crate::zone::{RecomputeReport, RemovalZone};

/// Result of a nearest-zone search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestZone {
    pub handle: ZoneHandle,
    pub distance_squared: f32,
}

/// Registry of all live remover zones.
///
/// # Architecture
///
/// ```text
/// ZoneRegistry
/// ├── zones: BTreeMap<ZoneHandle, RemovalZone>  (live zones, handle order)
/// └── next_handle: u64  (monotonic allocator)
/// ```
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: BTreeMap<ZoneHandle, RemovalZone>,
    next_handle: u64,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zone at `position`, registers it, and applies `data`.
    ///
    /// The zone is registered before the first recomputation, so it is
    /// visible to lookups even when `data` is `None`.
    pub fn spawn(
        &mut self,
        position: Position,
        data: Option<ZoneData>,
        world: &mut dyn EntityWorld,
    ) -> (ZoneHandle, RecomputeReport) {
        self.next_handle += 1;
        let handle = ZoneHandle(self.next_handle);

        let zone = self
            .zones
            .entry(handle)
            .or_insert_with(|| RemovalZone::new(handle, position));
        let report = zone.set_data(data, world);

        info!(
            target: "removals::registry",
            zone = %handle,
            position = %position,
            live = self.zones.len(),
            "zone spawned"
        );

        (handle, report)
    }

    /// Unregisters a zone. Returns `None` if the handle is not live.
    pub fn despawn(&mut self, handle: ZoneHandle) -> Option<RemovalZone> {
        let removed = self.zones.remove(&handle);
        if removed.is_some() {
            info!(
                target: "removals::registry",
                zone = %handle,
                live = self.zones.len(),
                "zone killed"
            );
        }
        removed
    }

    pub fn get(&self, handle: ZoneHandle) -> Option<&RemovalZone> {
        self.zones.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ZoneHandle) -> Option<&mut RemovalZone> {
        self.zones.get_mut(&handle)
    }

    pub fn contains(&self, handle: ZoneHandle) -> bool {
        self.zones.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemovalZone> + '_ {
        self.zones.values()
    }

    /// Finds the zone closest to `point` among those strictly nearer than
    /// `max_distance_squared`.
    ///
    /// Returns `None` when the registry is empty or every zone is too far.
    /// Ties resolve to the earliest-spawned zone.
    pub fn nearest(&self, point: Position, max_distance_squared: f32) -> Option<NearestZone> {
        let nearest = self
            .zones
            .values()
            .map(|zone| NearestZone {
                handle: zone.handle(),
                distance_squared: zone.position().distance_squared(point),
            })
            .filter(|candidate| candidate.distance_squared < max_distance_squared)
            .min_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));

        debug!(
            target: "removals::registry",
            point = %point,
            candidates = self.zones.len(),
            selected = ?nearest.map(|n| n.handle),
            "nearest zone lookup"
        );

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{HostEntity, SphereQuery};
    use crate::types::EntityId;

    struct EmptyWorld;

    impl EntityWorld for EmptyWorld {
        fn entities_in_sphere(&self, _query: &SphereQuery) -> Vec<HostEntity> {
            Vec::new()
        }

        fn kill(&mut self, _id: EntityId) {}
    }

    fn spawn_at(registry: &mut ZoneRegistry, x: f32) -> ZoneHandle {
        registry
            .spawn(Position::new(x, 0.0, 0.0), None, &mut EmptyWorld)
            .0
    }

    #[test]
    fn spawn_and_despawn_track_membership_once() {
        let mut registry = ZoneRegistry::new();
        let a = spawn_at(&mut registry, 0.0);
        let b = spawn_at(&mut registry, 1.0);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        assert!(registry.despawn(a).is_some());
        assert!(registry.despawn(a).is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(b));
    }

    #[test]
    fn handles_are_not_reused_after_despawn() {
        let mut registry = ZoneRegistry::new();
        let a = spawn_at(&mut registry, 0.0);
        registry.despawn(a);
        let b = spawn_at(&mut registry, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn nearest_picks_closest_eligible_zone() {
        let mut registry = ZoneRegistry::new();
        // Squared distances from the origin: 4, 9.5, 1.
        spawn_at(&mut registry, 2.0);
        spawn_at(&mut registry, 9.5_f32.sqrt());
        let closest = spawn_at(&mut registry, 1.0);

        let nearest = registry.nearest(Position::ORIGIN, 9.0).unwrap();
        assert_eq!(nearest.handle, closest);
        assert_eq!(nearest.distance_squared, 1.0);
    }

    #[test]
    fn nearest_reports_none_when_all_zones_too_far() {
        let mut registry = ZoneRegistry::new();
        spawn_at(&mut registry, 4.0);
        spawn_at(&mut registry, 5.0);

        assert_eq!(registry.nearest(Position::ORIGIN, 9.0), None);
    }

    #[test]
    fn nearest_on_empty_registry_is_none() {
        assert_eq!(ZoneRegistry::new().nearest(Position::ORIGIN, 9.0), None);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut registry = ZoneRegistry::new();
        spawn_at(&mut registry, 3.0);
        assert_eq!(registry.nearest(Position::ORIGIN, 9.0), None);
    }
}
