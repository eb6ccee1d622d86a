use std::collections::HashMap;

use removals_core::{AimOracle, PlayerId, Position};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Aim {
    eyes: Position,
    hit: Option<Position>,
}

/// Fixed aim per player: eye position and the solid point the ray hits.
#[derive(Clone, Debug, Default)]
pub struct AimTable {
    aims: HashMap<PlayerId, Aim>,
}

impl AimTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where `player` is looking; `hit = None` means the ray hits nothing.
    pub fn set(&mut self, player: PlayerId, eyes: Position, hit: Option<Position>) {
        self.aims.insert(player, Aim { eyes, hit });
    }

    pub fn clear(&mut self, player: &PlayerId) {
        self.aims.remove(player);
    }
}

impl AimOracle for AimTable {
    fn aim_point(&self, player: &PlayerId, max_distance: f32) -> Option<Position> {
        let aim = self.aims.get(player)?;
        let hit = aim.hit?;
        (hit.distance_squared(aim.eyes) <= max_distance * max_distance).then_some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_beyond_ray_length_are_misses() {
        let player = PlayerId::new("p");
        let mut aims = AimTable::new();
        aims.set(
            player.clone(),
            Position::ORIGIN,
            Some(Position::new(0.0, 0.0, 150.0)),
        );

        assert_eq!(aims.aim_point(&player, 100.0), None);
        assert_eq!(
            aims.aim_point(&player, 200.0),
            Some(Position::new(0.0, 0.0, 150.0))
        );
        assert_eq!(aims.aim_point(&PlayerId::new("other"), 100.0), None);
    }
}
