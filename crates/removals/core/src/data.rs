//! Zone configuration value.
//!
//! [`ZoneData`] is what the host framework persists per zone and what operators
//! edit through commands. Prefab names are case-insensitive and stored
//! lower-cased, so the set can never hold two entries differing only by case.
//! With the `serde` feature the value maps onto the host's JSON shape
//! `{"Radius": 3.0, "PrefabNames": [...]}`, normalizing and validating on the
//! way in.
use std::collections::BTreeSet;

use crate::config::ZoneConfig;
use crate::error::{AddonError, ErrorSeverity};

/// Errors raised while building or editing a [`ZoneData`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ZoneDataError {
    #[error("radius must be a non-negative number, got {0}")]
    NegativeRadius(f32),

    #[error("radius must be a finite number")]
    NonFiniteRadius,

    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

impl AddonError for ZoneDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeRadius(_) => "ZONE_DATA_NEGATIVE_RADIUS",
            Self::NonFiniteRadius => "ZONE_DATA_NON_FINITE_RADIUS",
            Self::InvalidNumber(_) => "ZONE_DATA_INVALID_NUMBER",
        }
    }
}

/// Case-folds a prefab name into its stored form.
pub fn normalize_prefab(name: &str) -> String {
    name.to_lowercase()
}

/// Parses an operator-supplied radius.
///
/// Accepts any finite, non-negative real number (`"5"`, `"2.5"`, `" 0 "`).
///
/// # Errors
///
/// Returns `ZoneDataError::InvalidNumber` for unparseable text, and the
/// radius validation errors for negative or non-finite values.
pub fn parse_radius(input: &str) -> Result<f32, ZoneDataError> {
    let radius = input
        .trim()
        .parse::<f32>()
        .map_err(|_| ZoneDataError::InvalidNumber(input.to_owned()))?;
    validate_radius(radius)
}

fn validate_radius(radius: f32) -> Result<f32, ZoneDataError> {
    if !radius.is_finite() {
        return Err(ZoneDataError::NonFiniteRadius);
    }
    if radius < 0.0 {
        return Err(ZoneDataError::NegativeRadius(radius));
    }
    Ok(radius)
}

/// Radius and prefab allow-list of a remover zone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "repr::ZoneDataRepr", into = "repr::ZoneDataRepr")
)]
pub struct ZoneData {
    radius: f32,
    prefab_names: BTreeSet<String>,
}

impl ZoneData {
    pub fn new() -> Self {
        Self {
            radius: ZoneConfig::DEFAULT_RADIUS,
            prefab_names: BTreeSet::new(),
        }
    }

    /// Builds zone data from raw parts, normalizing every prefab name.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is negative or not finite.
    pub fn from_parts<I, S>(radius: f32, prefab_names: I) -> Result<Self, ZoneDataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let radius = validate_radius(radius)?;
        let prefab_names = prefab_names
            .into_iter()
            .map(|name| normalize_prefab(name.as_ref()))
            .collect();
        Ok(Self {
            radius,
            prefab_names,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Replaces the radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is negative or not finite; the current
    /// radius is left untouched.
    pub fn set_radius(&mut self, radius: f32) -> Result<(), ZoneDataError> {
        self.radius = validate_radius(radius)?;
        Ok(())
    }

    /// Stored (lower-cased) prefab names in ascending order.
    pub fn prefab_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.prefab_names.iter().map(String::as_str)
    }

    pub fn prefab_count(&self) -> usize {
        self.prefab_names.len()
    }

    /// Adds a prefab name. Returns `false` if an equivalent name was already present.
    pub fn add_prefab(&mut self, name: &str) -> bool {
        self.prefab_names.insert(normalize_prefab(name))
    }

    /// Removes a prefab name. Returns `false` if no equivalent name was present.
    pub fn remove_prefab(&mut self, name: &str) -> bool {
        self.prefab_names.remove(&normalize_prefab(name))
    }

    /// Case-insensitive membership test against an entity's prefab name.
    pub fn matches(&self, prefab_name: &str) -> bool {
        self.prefab_names.contains(&normalize_prefab(prefab_name))
    }
}

impl Default for ZoneData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "serde")]
mod repr {
    use super::{ZoneData, ZoneDataError};
    use crate::config::ZoneConfig;

    /// Wire shape used by the host framework's persisted addon data.
    ///
    /// The host stores the radius as a JSON number; it is carried as `f64`
    /// here so the shortest `f32` text (`2.2`, not `2.200000047683716`) is
    /// what the host sees.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(super) struct ZoneDataRepr {
        #[serde(rename = "Radius", default = "default_radius")]
        radius: f64,
        #[serde(rename = "PrefabNames", default)]
        prefab_names: Vec<String>,
    }

    fn default_radius() -> f64 {
        f64::from(ZoneConfig::DEFAULT_RADIUS)
    }

    /// Widens through the shortest decimal form that round-trips the `f32`.
    fn widen(radius: f32) -> f64 {
        radius
            .to_string()
            .parse()
            .unwrap_or_else(|_| f64::from(radius))
    }

    impl TryFrom<ZoneDataRepr> for ZoneData {
        type Error = ZoneDataError;

        fn try_from(repr: ZoneDataRepr) -> Result<Self, Self::Error> {
            // Out-of-range values narrow to infinity and fail validation.
            ZoneData::from_parts(repr.radius as f32, repr.prefab_names)
        }
    }

    impl From<ZoneData> for ZoneDataRepr {
        fn from(data: ZoneData) -> Self {
            Self {
                radius: widen(data.radius),
                prefab_names: data.prefab_names.into_iter().collect(),
            }
        }
    }
}
