//! Common error infrastructure for the removals crates.
//!
//! Concrete errors (e.g. [`crate::ZoneDataError`]) live next to the code that
//! raises them. This module provides the shared classification every error
//! implements so the addon can decide what to report, what to log, and what
//! disables the feature.

/// Severity level of an error, used for reporting and recovery decisions.
///
/// - **Validation**: operator input that must be corrected before retrying
/// - **Recoverable**: a transient world condition (nothing under the crosshair,
///   no zone nearby) that may succeed on a later attempt
/// - **Fatal**: the addon cannot operate until the host integration is fixed
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: missing command argument, negative radius, no permission
    Validation,

    /// Retrying with a different world state may succeed.
    ///
    /// Examples: aim point hits nothing, no zone within reach
    Recoverable,

    /// Integration broken, feature disabled.
    ///
    /// Examples: host framework not loaded, handler bundle missing `SetData`
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error means the feature is unusable.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all removals errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by recoverability, not by impact
/// - Keep `error_code` stable; it is used in logs and tests
pub trait AddonError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_round_trips_through_strum() {
        assert_eq!(ErrorSeverity::Validation.as_ref(), "validation");
        assert_eq!(
            "FATAL".parse::<ErrorSeverity>().unwrap(),
            ErrorSeverity::Fatal
        );
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_fatal());
    }
}
