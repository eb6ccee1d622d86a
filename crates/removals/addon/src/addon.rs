//! Composition root tying registry, adapter, dispatcher, and replies together.
use std::cell::RefCell;
use std::rc::Rc;

use removals_core::{AddonError, ZoneData, ZoneHandle, ZoneRegistry};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};

use crate::adapter::CapabilityAdapter;
use crate::api::{AddonHost, CommandError, RegistrationError};
use crate::commands::{CommandDispatcher, CommandOutcome, RemoverCommand, ZoneEdit};
use crate::config::AddonConfig;
use crate::lang::{EnglishMessages, Localizer, MessageKey, render};
use crate::services::{HostServices, Invoker};

/// Reply produced for one command, ready to send to the invoker.
#[derive(Debug)]
pub struct CommandReply {
    pub text: String,
    pub result: Result<CommandOutcome, CommandError>,
}

impl CommandReply {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// The remover addon as embedded by a host process.
///
/// Owns the zone registry for the lifetime of the process and shares it with
/// the callbacks handed to the host. Forward the host's lifecycle events to
/// [`RemovalsAddon::on_server_initialized`] and
/// [`RemovalsAddon::on_plugin_loaded`], and its commands to
/// [`RemovalsAddon::handle_command`].
pub struct RemovalsAddon {
    config: AddonConfig,
    registry: Rc<RefCell<ZoneRegistry>>,
    adapter: CapabilityAdapter,
    dispatcher: CommandDispatcher,
    localizer: Box<dyn Localizer>,
}

impl RemovalsAddon {
    pub fn new(config: AddonConfig) -> Self {
        let registry = Rc::new(RefCell::new(ZoneRegistry::new()));
        let adapter = CapabilityAdapter::new(config.addon_name.clone(), Rc::clone(&registry));
        let dispatcher = CommandDispatcher::new(config.clone(), Rc::clone(&registry));
        Self {
            config,
            registry,
            adapter,
            dispatcher,
            localizer: Box::new(EnglishMessages),
        }
    }

    /// Replaces the English replies with a host-provided localizer.
    #[must_use]
    pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Box::new(localizer);
        self
    }

    pub fn config(&self) -> &AddonConfig {
        &self.config
    }

    pub fn is_registered(&self) -> bool {
        self.adapter.is_registered()
    }

    /// Fully qualified names of the commands this addon answers.
    pub fn command_names(&self) -> Vec<String> {
        RemoverCommand::iter()
            .map(|verb| self.config.command_name(verb.as_ref()))
            .collect()
    }

    pub fn zone_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Snapshot of a zone's current data.
    pub fn zone_data(&self, handle: ZoneHandle) -> Option<ZoneData> {
        self.registry.borrow().get(handle)?.data().cloned()
    }

    /// Server start: registers with the host if it is loaded.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::HostNotLoaded` when `host` is `None`, or
    /// the handshake error. The addon stays disabled in either case.
    pub fn on_server_initialized(
        &mut self,
        host: Option<&mut dyn AddonHost>,
    ) -> Result<(), RegistrationError> {
        let Some(host) = host else {
            error!(
                target: "removals::addon",
                host = %self.config.host_plugin_name,
                "host framework is not loaded, remover zones are disabled"
            );
            return Err(RegistrationError::HostNotLoaded {
                host: self.config.host_plugin_name.clone(),
            });
        };
        self.adapter.register(host)
    }

    /// Plugin (re)load: re-registers when the loaded plugin is the host framework.
    ///
    /// Returns `None` for unrelated plugins.
    pub fn on_plugin_loaded(
        &mut self,
        plugin_name: &str,
        host: &mut dyn AddonHost,
    ) -> Option<Result<(), RegistrationError>> {
        if plugin_name != self.config.host_plugin_name {
            return None;
        }
        info!(
            target: "removals::addon",
            host = plugin_name,
            "host framework loaded, re-registering"
        );
        Some(self.adapter.register(host))
    }

    /// Runs an operator command and renders the reply.
    ///
    /// Never panics on bad input; every failure becomes a reply.
    pub fn handle_command(
        &mut self,
        invoker: &Invoker,
        command: &str,
        args: &[&str],
        services: &mut HostServices<'_>,
    ) -> CommandReply {
        let result = self
            .dispatcher
            .execute(invoker, command, args, services, &mut self.adapter);

        let text = match &result {
            Ok(outcome) => self.success_text(invoker, outcome),
            Err(err) => {
                debug!(
                    target: "removals::addon",
                    command,
                    code = err.error_code(),
                    severity = %err.severity(),
                    "command rejected"
                );
                self.error_text(invoker, command, err)
            }
        };

        CommandReply { text, result }
    }

    fn success_text(&self, invoker: &Invoker, outcome: &CommandOutcome) -> String {
        let player = invoker.player_id();
        match &outcome.edit {
            ZoneEdit::AddPrefab(prefab) => render(
                self.localizer.as_ref(),
                player,
                MessageKey::PrefabAdded,
                &[("prefab", prefab.as_str())],
            ),
            ZoneEdit::RemovePrefab(prefab) => render(
                self.localizer.as_ref(),
                player,
                MessageKey::PrefabRemoved,
                &[("prefab", prefab.as_str())],
            ),
            ZoneEdit::SetRadius(radius) => render(
                self.localizer.as_ref(),
                player,
                MessageKey::RadiusUpdated,
                &[("radius", radius.to_string().as_str())],
            ),
        }
    }

    fn error_text(&self, invoker: &Invoker, command: &str, err: &CommandError) -> String {
        let player = invoker.player_id();
        let localizer = self.localizer.as_ref();
        match err {
            CommandError::PlayerOnly => render(localizer, player, MessageKey::ErrorPlayerOnly, &[]),
            CommandError::NoPermission { .. } => {
                render(localizer, player, MessageKey::ErrorNoPermission, &[])
            }
            CommandError::FeatureUnavailable => {
                render(localizer, player, MessageKey::ErrorUnavailable, &[])
            }
            CommandError::UnknownCommand(_) => render(
                localizer,
                player,
                MessageKey::ErrorUnknownCommand,
                &[("command", command)],
            ),
            CommandError::Syntax { usage, .. } => render(
                localizer,
                player,
                MessageKey::ErrorSyntax,
                &[("command", command), ("usage", *usage)],
            ),
            CommandError::InvalidRadius { .. } => render(
                localizer,
                player,
                MessageKey::ErrorSyntax,
                &[
                    ("command", command),
                    ("usage", RemoverCommand::Radius.usage()),
                ],
            ),
            CommandError::NoAimPoint => render(localizer, player, MessageKey::ErrorNoAimPoint, &[]),
            CommandError::NoTargetZone => {
                render(localizer, player, MessageKey::ErrorNoTargetZone, &[])
            }
            CommandError::Encode(source) => {
                error!(target: "removals::addon", error = %source, "failed to encode zone data");
                render(localizer, player, MessageKey::ErrorInternal, &[])
            }
        }
    }
}
