use std::collections::BTreeMap;

use removals_core::{EntityId, EntityWorld, HostEntity, SphereQuery};

/// Entity store with deferred removal.
///
/// `kill` marks an entity destroyed immediately but keeps it in the store
/// until [`InMemoryWorld::flush`] runs, mimicking an engine that removes
/// objects at the end of the tick.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorld {
    entities: BTreeMap<EntityId, HostEntity>,
    kill_log: Vec<EntityId>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: impl IntoIterator<Item = HostEntity>) -> Self {
        let mut world = Self::new();
        for entity in entities {
            world.insert(entity);
        }
        world
    }

    /// Adds or replaces an entity.
    pub fn insert(&mut self, entity: HostEntity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&HostEntity> {
        self.entities.get(&id)
    }

    /// True if the entity exists and has not been killed.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(|e| !e.destroyed)
    }

    pub fn alive(&self) -> impl Iterator<Item = &HostEntity> + '_ {
        self.entities.values().filter(|e| !e.destroyed)
    }

    /// Entities killed so far, in kill order. Each entity appears at most once.
    pub fn kill_log(&self) -> &[EntityId] {
        &self.kill_log
    }

    /// Drops destroyed entities from the store.
    pub fn flush(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, e| !e.destroyed);
        before - self.entities.len()
    }
}

impl EntityWorld for InMemoryWorld {
    fn entities_in_sphere(&self, query: &SphereQuery) -> Vec<HostEntity> {
        self.entities
            .values()
            .filter(|e| query.admits(e.position, e.layers))
            .cloned()
            .collect()
    }

    fn kill(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            if !entity.destroyed {
                entity.destroyed = true;
                self.kill_log.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use removals_core::Position;

    #[test]
    fn repeated_kill_is_a_no_op_and_flush_is_deferred() {
        let mut world = InMemoryWorld::with_entities([HostEntity::new(
            EntityId(1),
            "box",
            Position::ORIGIN,
        )]);

        world.kill(EntityId(1));
        world.kill(EntityId(1));
        world.kill(EntityId(2));

        assert_eq!(world.kill_log(), &[EntityId(1)]);
        assert!(!world.is_alive(EntityId(1)));
        assert!(world.get(EntityId(1)).is_some());
        assert_eq!(world.flush(), 1);
        assert!(world.get(EntityId(1)).is_none());
    }
}
