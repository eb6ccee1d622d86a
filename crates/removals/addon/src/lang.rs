//! Reply catalog and localization seam.
//!
//! Every reply has a stable key and an English default. Hosts with a
//! localization subsystem register [`default_messages`] and implement
//! [`Localizer`] to serve per-player translations; placeholders such as
//! `{prefab}` are substituted after lookup.
use std::collections::BTreeMap;

use removals_core::PlayerId;
use strum::IntoEnumIterator;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum MessageKey {
    #[strum(serialize = "Error.NoPermission")]
    ErrorNoPermission,
    #[strum(serialize = "Error.PlayerOnly")]
    ErrorPlayerOnly,
    #[strum(serialize = "Error.Unavailable")]
    ErrorUnavailable,
    #[strum(serialize = "Error.UnknownCommand")]
    ErrorUnknownCommand,
    #[strum(serialize = "Error.Syntax")]
    ErrorSyntax,
    #[strum(serialize = "Error.NoAimPoint")]
    ErrorNoAimPoint,
    #[strum(serialize = "Error.NoTargetZone")]
    ErrorNoTargetZone,
    #[strum(serialize = "Error.Internal")]
    ErrorInternal,
    #[strum(serialize = "Remover.PrefabAdded")]
    PrefabAdded,
    #[strum(serialize = "Remover.PrefabRemoved")]
    PrefabRemoved,
    #[strum(serialize = "Remover.RadiusUpdated")]
    RadiusUpdated,
}

impl MessageKey {
    /// English template for this key.
    pub const fn english(self) -> &'static str {
        match self {
            Self::ErrorNoPermission => "You don't have permission to do that.",
            Self::ErrorPlayerOnly => "This command can only be run by a player.",
            Self::ErrorUnavailable => {
                "Remover zones are unavailable: Monument Addons integration failed."
            }
            Self::ErrorUnknownCommand => "Unknown command: {command}",
            Self::ErrorSyntax => "Syntax: {command} {usage}",
            Self::ErrorNoAimPoint => "No hit",
            Self::ErrorNoTargetZone => "No remover found",
            Self::ErrorInternal => "Something went wrong, see the server log.",
            Self::PrefabAdded => "Added prefab to remover: {prefab}",
            Self::PrefabRemoved => "Removed prefab from remover: {prefab}",
            Self::RadiusUpdated => "Updated radius for remover: {radius}",
        }
    }
}

/// Per-player message lookup.
pub trait Localizer {
    /// Returns the template for `key`, or `None` to fall back to English.
    fn template(&self, player: Option<&PlayerId>, key: MessageKey) -> Option<String>;
}

/// Localizer serving the built-in English templates.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishMessages;

impl Localizer for EnglishMessages {
    fn template(&self, _player: Option<&PlayerId>, key: MessageKey) -> Option<String> {
        Some(key.english().to_owned())
    }
}

/// Key → English text map for registering with a host messaging system.
pub fn default_messages() -> BTreeMap<&'static str, &'static str> {
    MessageKey::iter()
        .map(|key| (<&'static str>::from(key), key.english()))
        .collect()
}

/// Looks up `key` for `player` and substitutes `{name}` placeholders.
pub fn render(
    localizer: &dyn Localizer,
    player: Option<&PlayerId>,
    key: MessageKey,
    args: &[(&str, &str)],
) -> String {
    let mut text = localizer
        .template(player, key)
        .unwrap_or_else(|| key.english().to_owned());
    for (name, value) in args {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pirate;

    impl Localizer for Pirate {
        fn template(&self, _player: Option<&PlayerId>, key: MessageKey) -> Option<String> {
            (key == MessageKey::PrefabAdded).then(|| "Arr, {prefab} be marked".to_owned())
        }
    }

    #[test]
    fn every_key_has_a_unique_name() {
        let messages = default_messages();
        assert_eq!(messages.len(), MessageKey::iter().count());
        assert_eq!(
            messages.get("Remover.RadiusUpdated"),
            Some(&"Updated radius for remover: {radius}")
        );
        assert_eq!(
            messages.get("Error.NoPermission"),
            Some(&"You don't have permission to do that.")
        );
    }

    #[test]
    fn render_substitutes_placeholders() {
        let text = render(
            &EnglishMessages,
            None,
            MessageKey::ErrorSyntax,
            &[("command", "mar.add"), ("usage", "<prefab>")],
        );
        assert_eq!(text, "Syntax: mar.add <prefab>");
    }

    #[test]
    fn render_falls_back_to_english() {
        let player = PlayerId::new("76561198000000000");
        assert_eq!(
            render(&Pirate, Some(&player), MessageKey::PrefabAdded, &[("prefab", "door")]),
            "Arr, door be marked"
        );
        assert_eq!(
            render(&Pirate, Some(&player), MessageKey::ErrorNoAimPoint, &[]),
            "No hit"
        );
    }
}
