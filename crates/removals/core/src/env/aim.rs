use crate::types::{PlayerId, Position};

/// Resolves where a player is looking.
pub trait AimOracle {
    /// Casts a ray from the player's eyes against solid geometry, ignoring
    /// triggers, and returns the first hit point within `max_distance`.
    ///
    /// Returns `None` when the ray hits nothing or the player is unknown.
    fn aim_point(&self, player: &PlayerId, max_distance: f32) -> Option<Position>;
}
