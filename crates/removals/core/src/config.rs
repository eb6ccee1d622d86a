/// Zone defaults and targeting thresholds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneConfig {
    /// Maximum distance between an aim point and a zone for the zone to be targeted.
    /// Eligibility is strict: a zone exactly this far away is not selected.
    pub target_distance: f32,
    /// Length of the ray cast from an operator's eyes when resolving the aim point.
    pub max_ray_distance: f32,
}

impl ZoneConfig {
    // ===== data defaults =====
    pub const DEFAULT_RADIUS: f32 = 3.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TARGET_DISTANCE: f32 = 3.0;
    pub const DEFAULT_MAX_RAY_DISTANCE: f32 = 100.0;

    pub fn new() -> Self {
        Self {
            target_distance: Self::DEFAULT_TARGET_DISTANCE,
            max_ray_distance: Self::DEFAULT_MAX_RAY_DISTANCE,
        }
    }

    /// Squared targeting threshold, compared against squared distances.
    pub fn target_distance_squared(&self) -> f32 {
        self.target_distance * self.target_distance
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::new()
    }
}
