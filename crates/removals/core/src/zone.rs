//! Positioned remover zone and its recomputation pass.
use tracing::{debug, trace};

use crate::data::ZoneData;
use crate::env::{EntityWorld, SphereQuery};
use crate::types::{Position, ZoneHandle};

/// Outcome of one recomputation pass.
///
/// Only used for logging and tests; the host protocol never sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Entities returned by the sphere query.
    pub scanned: usize,
    /// Kill requests issued.
    pub killed: usize,
    /// Matching entities already destroyed or pending removal.
    pub skipped_destroyed: usize,
    /// Matching entities owned by the host framework.
    pub skipped_host_owned: usize,
}

/// A remover zone placed by the host framework.
///
/// The position is fixed for the zone's lifetime. Whenever the data changes
/// through [`RemovalZone::set_data`], the zone rescans its surroundings and
/// destroys every matching entity that the host does not own.
#[derive(Clone, Debug, PartialEq)]
pub struct RemovalZone {
    handle: ZoneHandle,
    position: Position,
    data: Option<ZoneData>,
}

impl RemovalZone {
    pub fn new(handle: ZoneHandle, position: Position) -> Self {
        Self {
            handle,
            position,
            data: None,
        }
    }

    pub fn handle(&self) -> ZoneHandle {
        self.handle
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Current configuration, `None` while the zone is unconfigured.
    pub fn data(&self) -> Option<&ZoneData> {
        self.data.as_ref()
    }

    /// Replaces the configuration and immediately recomputes.
    ///
    /// Passing `None` disables removals until data is set again.
    pub fn set_data(
        &mut self,
        data: Option<ZoneData>,
        world: &mut dyn EntityWorld,
    ) -> RecomputeReport {
        self.data = data;
        self.recompute(world)
    }

    /// Destroys every entity within the radius whose prefab matches the
    /// allow-list, skipping destroyed and host-owned entities.
    pub fn recompute(&self, world: &mut dyn EntityWorld) -> RecomputeReport {
        let Some(data) = &self.data else {
            trace!(target: "removals::zone", zone = %self.handle, "no data, skipping recompute");
            return RecomputeReport::default();
        };

        let query = SphereQuery::solid(self.position, data.radius());
        let candidates = world.entities_in_sphere(&query);
        let mut report = RecomputeReport {
            scanned: candidates.len(),
            ..RecomputeReport::default()
        };

        for entity in candidates {
            if !query.admits(entity.position, entity.layers) {
                continue;
            }
            if !data.matches(&entity.prefab_name) {
                continue;
            }
            if entity.destroyed {
                report.skipped_destroyed += 1;
                continue;
            }
            if entity.host_owned {
                trace!(
                    target: "removals::zone",
                    zone = %self.handle,
                    entity = %entity.id,
                    prefab = %entity.prefab_name,
                    "skipping host-owned entity"
                );
                report.skipped_host_owned += 1;
                continue;
            }

            world.kill(entity.id);
            report.killed += 1;
        }

        debug!(
            target: "removals::zone",
            zone = %self.handle,
            position = %self.position,
            radius = data.radius(),
            scanned = report.scanned,
            killed = report.killed,
            skipped_destroyed = report.skipped_destroyed,
            skipped_host_owned = report.skipped_host_owned,
            "recomputed removals"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EntityLayers, HostEntity};
    use crate::types::EntityId;

    #[derive(Default)]
    struct VecWorld {
        entities: Vec<HostEntity>,
        kill_requests: Vec<EntityId>,
    }

    impl EntityWorld for VecWorld {
        fn entities_in_sphere(&self, query: &SphereQuery) -> Vec<HostEntity> {
            self.entities
                .iter()
                .filter(|e| query.admits(e.position, e.layers))
                .cloned()
                .collect()
        }

        fn kill(&mut self, id: EntityId) {
            self.kill_requests.push(id);
            if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
                entity.destroyed = true;
            }
        }
    }

    fn wall_frame(id: u64, x: f32) -> HostEntity {
        HostEntity::new(EntityId(id), "wall.frame", Position::new(x, 0.0, 0.0))
    }

    fn zone_with(prefabs: &[&str], radius: f32) -> (RemovalZone, ZoneData) {
        let zone = RemovalZone::new(ZoneHandle(1), Position::ORIGIN);
        let data = ZoneData::from_parts(radius, prefabs.iter().copied()).unwrap();
        (zone, data)
    }

    #[test]
    fn destroys_matching_entity_within_radius() {
        let mut world = VecWorld {
            entities: vec![wall_frame(1, 2.0)],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        let report = zone.set_data(Some(data), &mut world);

        assert_eq!(report.killed, 1);
        assert_eq!(world.kill_requests, vec![EntityId(1)]);
    }

    #[test]
    fn keeps_host_owned_entity() {
        let mut world = VecWorld {
            entities: vec![wall_frame(1, 2.0).host_owned()],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        let report = zone.set_data(Some(data), &mut world);

        assert_eq!(report.killed, 0);
        assert_eq!(report.skipped_host_owned, 1);
        assert!(world.kill_requests.is_empty());
    }

    #[test]
    fn keeps_entity_outside_radius() {
        let mut world = VecWorld {
            entities: vec![wall_frame(1, 5.0)],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        zone.set_data(Some(data), &mut world);

        assert!(world.kill_requests.is_empty());
    }

    #[test]
    fn matches_prefab_names_case_insensitively() {
        let mut world = VecWorld {
            entities: vec![HostEntity::new(
                EntityId(7),
                "Assets/Prefabs/Door.Prefab",
                Position::new(1.0, 0.0, 0.0),
            )],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["assets/prefabs/door.prefab"], 3.0);

        zone.set_data(Some(data), &mut world);

        assert_eq!(world.kill_requests, vec![EntityId(7)]);
    }

    #[test]
    fn skips_already_destroyed_entities_on_repeat() {
        let mut world = VecWorld {
            entities: vec![wall_frame(1, 1.0), wall_frame(2, 1.5)],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        zone.set_data(Some(data.clone()), &mut world);
        let second = zone.set_data(Some(data), &mut world);

        assert_eq!(world.kill_requests.len(), 2);
        assert_eq!(second.killed, 0);
        assert_eq!(second.skipped_destroyed, 2);
    }

    #[test]
    fn none_data_performs_no_removals() {
        let mut world = VecWorld {
            entities: vec![wall_frame(1, 1.0)],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        let report = zone.set_data(None, &mut world);
        assert_eq!(report, RecomputeReport::default());
        assert!(world.kill_requests.is_empty());
        assert!(zone.data().is_none());

        zone.set_data(Some(data), &mut world);
        assert_eq!(world.kill_requests, vec![EntityId(1)]);
    }

    #[test]
    fn ignores_trigger_volumes_and_non_matching_types() {
        let mut world = VecWorld {
            entities: vec![
                wall_frame(1, 1.0).with_layers(EntityLayers::DEPLOYED | EntityLayers::TRIGGER),
                HostEntity::new(EntityId(2), "box.wooden", Position::new(1.0, 0.0, 0.0)),
            ],
            ..VecWorld::default()
        };
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        zone.set_data(Some(data), &mut world);

        assert!(world.kill_requests.is_empty());
    }

    #[test]
    fn rechecks_distance_when_world_over_reports() {
        struct CoarseWorld(Vec<HostEntity>, Vec<EntityId>);
        impl EntityWorld for CoarseWorld {
            fn entities_in_sphere(&self, _query: &SphereQuery) -> Vec<HostEntity> {
                self.0.clone()
            }
            fn kill(&mut self, id: EntityId) {
                self.1.push(id);
            }
        }

        let mut world = CoarseWorld(vec![wall_frame(1, 2.0), wall_frame(2, 9.0)], Vec::new());
        let (mut zone, data) = zone_with(&["wall.frame"], 3.0);

        zone.set_data(Some(data), &mut world);

        assert_eq!(world.1, vec![EntityId(1)]);
    }
}
