//! Error types surfaced by the addon.
//!
//! [`CommandError`] covers everything an operator command can run into and is
//! always resolved into a reply at the command boundary. [`RegistrationError`]
//! covers the handshake with the host framework; any of its variants leaves
//! the addon disabled until the host reloads.
use removals_core::{AddonError, ErrorSeverity, ZoneDataError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command can only be run by a player")]
    PlayerOnly,

    #[error("missing permission '{permission}'")]
    NoPermission { permission: String },

    #[error("remover addon is not registered with the host framework")]
    FeatureUnavailable,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("syntax: {command} {usage}")]
    Syntax {
        command: String,
        usage: &'static str,
    },

    #[error("invalid radius for {command}")]
    InvalidRadius {
        command: String,
        #[source]
        source: ZoneDataError,
    },

    #[error("aim point not found")]
    NoAimPoint,

    #[error("no remover zone within reach of the aim point")]
    NoTargetZone,

    #[error("failed to encode zone data for the host")]
    Encode(#[source] serde_json::Error),
}

impl AddonError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            PlayerOnly | NoPermission { .. } | UnknownCommand(_) | Syntax { .. }
            | InvalidRadius { .. } => ErrorSeverity::Validation,
            NoAimPoint | NoTargetZone => ErrorSeverity::Recoverable,
            FeatureUnavailable | Encode(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            PlayerOnly => "COMMAND_PLAYER_ONLY",
            NoPermission { .. } => "COMMAND_NO_PERMISSION",
            FeatureUnavailable => "COMMAND_FEATURE_UNAVAILABLE",
            UnknownCommand(_) => "COMMAND_UNKNOWN",
            Syntax { .. } => "COMMAND_SYNTAX",
            InvalidRadius { .. } => "COMMAND_INVALID_RADIUS",
            NoAimPoint => "COMMAND_NO_AIM_POINT",
            NoTargetZone => "COMMAND_NO_TARGET_ZONE",
            Encode(_) => "COMMAND_ENCODE",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{host} is not loaded")]
    HostNotLoaded { host: String },

    #[error("host refused registration of addon '{addon}'")]
    Rejected { addon: String },

    #[error("host did not return a SetData callback for addon '{addon}'")]
    MissingSetData { addon: String },
}

impl AddonError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HostNotLoaded { .. } => "REGISTRATION_HOST_NOT_LOADED",
            Self::Rejected { .. } => "REGISTRATION_REJECTED",
            Self::MissingSetData { .. } => "REGISTRATION_MISSING_SET_DATA",
        }
    }
}
