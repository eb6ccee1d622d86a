use bitflags::bitflags;

use crate::types::{EntityId, Position};

bitflags! {
    /// Physics layers an entity's colliders belong to.
    ///
    /// Sphere queries carry a mask; only entities with at least one layer in
    /// the mask are returned.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityLayers: u16 {
        const TERRAIN      = 1 << 0;
        const WORLD        = 1 << 1;
        const CONSTRUCTION = 1 << 2;
        const DEPLOYED     = 1 << 3;
        const TREE         = 1 << 4;
        const VEHICLE      = 1 << 5;
        const PLAYER       = 1 << 6;
        const TRIGGER      = 1 << 7;

        /// Everything a ray or overlap treats as solid.
        const SOLID = Self::TERRAIN.bits()
            | Self::WORLD.bits()
            | Self::CONSTRUCTION.bits()
            | Self::DEPLOYED.bits()
            | Self::TREE.bits()
            | Self::VEHICLE.bits()
            | Self::PLAYER.bits();
    }
}

/// Whether trigger volumes participate in a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerInteraction {
    #[default]
    Ignore,
    Collide,
}

/// Overlap query around a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereQuery {
    pub center: Position,
    pub radius: f32,
    pub layers: EntityLayers,
    pub triggers: TriggerInteraction,
}

impl SphereQuery {
    /// Query for solid, non-trigger entities within `radius` of `center`.
    pub fn solid(center: Position, radius: f32) -> Self {
        Self {
            center,
            radius,
            layers: EntityLayers::SOLID,
            triggers: TriggerInteraction::Ignore,
        }
    }

    /// Returns true if an entity on `layers` at `position` satisfies this query.
    ///
    /// The distance test is inclusive. Hosts backed by a coarse spatial index
    /// can use this to filter their candidates.
    pub fn admits(&self, position: Position, layers: EntityLayers) -> bool {
        if !layers.intersects(self.layers) {
            return false;
        }
        if self.triggers == TriggerInteraction::Ignore && layers.contains(EntityLayers::TRIGGER) {
            return false;
        }
        position.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Read-only view of a host entity returned by a sphere query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostEntity {
    pub id: EntityId,
    pub prefab_name: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default = "default_layers"))]
    pub layers: EntityLayers,
    /// Set once a kill request has been accepted, even if removal is deferred.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destroyed: bool,
    /// Entity is managed by the host addon framework and must never be removed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub host_owned: bool,
}

#[cfg(feature = "serde")]
fn default_layers() -> EntityLayers {
    EntityLayers::DEPLOYED
}

impl HostEntity {
    pub fn new(id: EntityId, prefab_name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            prefab_name: prefab_name.into(),
            position,
            layers: EntityLayers::DEPLOYED,
            destroyed: false,
            host_owned: false,
        }
    }

    #[must_use]
    pub fn with_layers(mut self, layers: EntityLayers) -> Self {
        self.layers = layers;
        self
    }

    #[must_use]
    pub fn host_owned(mut self) -> Self {
        self.host_owned = true;
        self
    }
}

/// Mutable access to the host simulation.
pub trait EntityWorld {
    /// Returns entities overlapping the query sphere.
    ///
    /// Implementations may return already-destroyed entities whose removal is
    /// still pending; callers are expected to check [`HostEntity::destroyed`].
    fn entities_in_sphere(&self, query: &SphereQuery) -> Vec<HostEntity>;

    /// Requests destruction of an entity.
    ///
    /// The host may defer the actual removal. Killing an entity that is
    /// already destroyed or unknown must be a no-op.
    fn kill(&mut self, id: EntityId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_query_ignores_triggers_and_distant_entities() {
        let query = SphereQuery::solid(Position::ORIGIN, 3.0);

        assert!(query.admits(Position::new(3.0, 0.0, 0.0), EntityLayers::DEPLOYED));
        assert!(!query.admits(Position::new(3.1, 0.0, 0.0), EntityLayers::DEPLOYED));
        assert!(!query.admits(
            Position::ORIGIN,
            EntityLayers::DEPLOYED | EntityLayers::TRIGGER
        ));
        assert!(!query.admits(Position::ORIGIN, EntityLayers::empty()));
    }

    #[test]
    fn trigger_collide_admits_trigger_volumes() {
        let mut query = SphereQuery::solid(Position::ORIGIN, 1.0);
        query.triggers = TriggerInteraction::Collide;
        assert!(query.admits(
            Position::ORIGIN,
            EntityLayers::WORLD | EntityLayers::TRIGGER
        ));
    }
}
