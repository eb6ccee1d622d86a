//! Addon configuration and environment loading.
use std::env;

use removals_core::ZoneConfig;

/// Configuration for the remover addon.
#[derive(Clone, Debug, PartialEq)]
pub struct AddonConfig {
    /// Addon type name announced to the host framework.
    pub addon_name: String,
    /// Name of the host framework plugin; its (re)load triggers re-registration.
    pub host_plugin_name: String,
    /// Permission required to edit zones.
    pub admin_permission: String,
    /// Prefix of the operator commands (`<prefix>.add`, ...).
    pub command_prefix: String,
    pub zone: ZoneConfig,
}

impl AddonConfig {
    pub const DEFAULT_ADDON_NAME: &'static str = "remover";
    pub const DEFAULT_HOST_PLUGIN_NAME: &'static str = "MonumentAddons";
    pub const DEFAULT_ADMIN_PERMISSION: &'static str = "monumentaddons.admin";
    pub const DEFAULT_COMMAND_PREFIX: &'static str = "mar";

    pub fn new() -> Self {
        Self {
            addon_name: Self::DEFAULT_ADDON_NAME.to_owned(),
            host_plugin_name: Self::DEFAULT_HOST_PLUGIN_NAME.to_owned(),
            admin_permission: Self::DEFAULT_ADMIN_PERMISSION.to_owned(),
            command_prefix: Self::DEFAULT_COMMAND_PREFIX.to_owned(),
            zone: ZoneConfig::default(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `REMOVALS_ADDON_NAME` - Addon type name (default: remover)
    /// - `REMOVALS_HOST_PLUGIN` - Host framework plugin name (default: MonumentAddons)
    /// - `REMOVALS_ADMIN_PERMISSION` - Permission for edits (default: monumentaddons.admin)
    /// - `REMOVALS_COMMAND_PREFIX` - Command prefix (default: mar)
    /// - `REMOVALS_TARGET_DISTANCE` - Max aim-to-zone distance (default: 3)
    /// - `REMOVALS_MAX_RAY_DISTANCE` - Aim ray length (default: 100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AddonConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = read_non_empty(&lookup, "REMOVALS_ADDON_NAME") {
            config.addon_name = name;
        }
        if let Some(name) = read_non_empty(&lookup, "REMOVALS_HOST_PLUGIN") {
            config.host_plugin_name = name;
        }
        if let Some(permission) = read_non_empty(&lookup, "REMOVALS_ADMIN_PERMISSION") {
            config.admin_permission = permission;
        }
        if let Some(prefix) = read_non_empty(&lookup, "REMOVALS_COMMAND_PREFIX") {
            config.command_prefix = prefix;
        }

        // Negative or non-finite distances would make every zone unreachable
        if let Some(distance) = read_env::<f32>(&lookup, "REMOVALS_TARGET_DISTANCE")
            .filter(|d| d.is_finite() && *d > 0.0)
        {
            config.zone.target_distance = distance;
        }
        if let Some(distance) = read_env::<f32>(&lookup, "REMOVALS_MAX_RAY_DISTANCE")
            .filter(|d| d.is_finite() && *d > 0.0)
        {
            config.zone.max_ray_distance = distance;
        }

        config
    }

    /// Fully qualified command name, e.g. `mar.add`.
    pub fn command_name(&self, verb: &str) -> String {
        format!("{}.{}", self.command_prefix, verb)
    }
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_conventions() {
        let config = AddonConfig::default();
        assert_eq!(config.addon_name, "remover");
        assert_eq!(config.admin_permission, "monumentaddons.admin");
        assert_eq!(config.command_name("radius"), "mar.radius");
        assert_eq!(config.zone.target_distance_squared(), 9.0);
    }

    fn lookup_from<'a>(
        pairs: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let config = AddonConfig::from_lookup(lookup_from(&[
            ("REMOVALS_ADDON_NAME", " wiper "),
            ("REMOVALS_HOST_PLUGIN", "Addons"),
            ("REMOVALS_ADMIN_PERMISSION", ""),
            ("REMOVALS_COMMAND_PREFIX", "wipe"),
            ("REMOVALS_TARGET_DISTANCE", "4.5"),
            ("REMOVALS_MAX_RAY_DISTANCE", "50"),
        ]));

        assert_eq!(config.addon_name, "wiper");
        assert_eq!(config.host_plugin_name, "Addons");
        assert_eq!(config.admin_permission, "monumentaddons.admin");
        assert_eq!(config.command_name("add"), "wipe.add");
        assert_eq!(config.zone.target_distance, 4.5);
        assert_eq!(config.zone.max_ray_distance, 50.0);
    }

    #[test]
    fn invalid_distances_keep_defaults() {
        for bad in ["-1", "0", "inf", "NaN", "far"] {
            let config = AddonConfig::from_lookup(lookup_from(&[
                ("REMOVALS_TARGET_DISTANCE", bad),
                ("REMOVALS_MAX_RAY_DISTANCE", bad),
            ]));
            assert_eq!(config.zone, ZoneConfig::default(), "value {bad:?}");
        }
    }

    #[test]
    fn empty_lookup_matches_defaults() {
        assert_eq!(AddonConfig::from_lookup(|_| None), AddonConfig::default());
    }
}
