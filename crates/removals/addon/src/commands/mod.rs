//! Operator commands that edit the zone under the crosshair.
//!
//! A command is parsed into a [`ZoneEdit`] before any world access, so syntax
//! errors never depend on where the operator is looking.
mod dispatcher;

pub use dispatcher::{CommandDispatcher, CommandOutcome};

use removals_core::{ZoneData, ZoneDataError, parse_radius};

use crate::api::CommandError;

/// Command verbs, matched case-insensitively after the configured prefix.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RemoverCommand {
    Add,
    Remove,
    Radius,
}

impl RemoverCommand {
    /// Argument placeholder shown in syntax replies.
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Add | Self::Remove => "<prefab>",
            Self::Radius => "<number>",
        }
    }

    /// Resolves a full command name such as `mar.add` against `prefix`.
    pub fn from_command(prefix: &str, command: &str) -> Option<Self> {
        let (head, verb) = command.rsplit_once('.')?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        verb.parse().ok()
    }

    /// Validates the arguments and produces the edit to apply.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Syntax` when the argument is missing and
    /// `CommandError::InvalidRadius` when the radius is not a finite,
    /// non-negative number.
    pub fn parse_edit(self, command: &str, args: &[&str]) -> Result<ZoneEdit, CommandError> {
        let syntax = || CommandError::Syntax {
            command: command.to_owned(),
            usage: self.usage(),
        };
        let arg = args
            .first()
            .map(|arg| arg.trim())
            .filter(|arg| !arg.is_empty())
            .ok_or_else(syntax)?;

        match self {
            Self::Add => Ok(ZoneEdit::AddPrefab(arg.to_owned())),
            Self::Remove => Ok(ZoneEdit::RemovePrefab(arg.to_owned())),
            Self::Radius => parse_radius(arg)
                .map(ZoneEdit::SetRadius)
                .map_err(|source| CommandError::InvalidRadius {
                    command: command.to_owned(),
                    source,
                }),
        }
    }
}

/// Mutation applied to a zone's data.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneEdit {
    AddPrefab(String),
    RemovePrefab(String),
    SetRadius(f32),
}

impl ZoneEdit {
    /// Applies the edit. Duplicate adds and absent removes leave `data` unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius edit carries an invalid value; `data` is
    /// left untouched.
    pub fn apply(&self, data: &mut ZoneData) -> Result<(), ZoneDataError> {
        match self {
            Self::AddPrefab(name) => {
                data.add_prefab(name);
            }
            Self::RemovePrefab(name) => {
                data.remove_prefab(name);
            }
            Self::SetRadius(radius) => data.set_radius(*radius)?,
        }
        Ok(())
    }
}
