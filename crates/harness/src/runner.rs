//! Replays a scenario against the in-memory host.
use removals_addon::{
    AddonConfig, AddonHost, AimTable, HostServices, InMemoryWorld, Invoker, MemoryHost,
    PermissionSet, RemovalsAddon,
};
use removals_core::{EntityId, Position, ZoneHandle};
use serde::Serialize;
use tracing::{info, warn};

use crate::scenario::Scenario;

/// Outcome of one replayed command.
#[derive(Clone, Debug, Serialize)]
pub struct ReplyRecord {
    pub invoker: String,
    pub command: String,
    pub success: bool,
    pub text: String,
}

/// Final state of one zone.
#[derive(Clone, Debug, Serialize)]
pub struct ZoneRecord {
    pub handle: ZoneHandle,
    pub position: Position,
    /// Data persisted on the host side.
    pub data: Option<serde_json::Value>,
    /// Inspection text the host would display.
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub registered: bool,
    pub replies: Vec<ReplyRecord>,
    pub zones: Vec<ZoneRecord>,
    /// Entities removed, in removal order.
    pub removed: Vec<EntityId>,
    pub survivors: Vec<EntityId>,
}

/// Runs `scenario` from server start to the last command.
///
/// Registration failures are not errors here: they are recorded in the
/// report and every later command answers that the feature is unavailable.
pub fn run(scenario: &Scenario, config: AddonConfig) -> ScenarioReport {
    let addon_name = config.addon_name.clone();
    let admin_permission = config.admin_permission.clone();

    let mut addon = RemovalsAddon::new(config);
    let mut host = MemoryHost::new();
    let mut world = InMemoryWorld::with_entities(scenario.entities.iter().cloned());

    let registered = {
        let host: &mut dyn AddonHost = &mut host;
        addon.on_server_initialized(Some(host)).is_ok()
    };

    let mut handles = Vec::with_capacity(scenario.zones.len());
    for zone in &scenario.zones {
        match host.place(
            &addon_name,
            &mut world,
            zone.position,
            zone.rotation,
            zone.data.clone(),
        ) {
            Some(handle) => handles.push((handle, zone.position)),
            None => warn!(
                target: "removals::harness",
                position = %zone.position,
                "zone not spawned, addon is not registered"
            ),
        }
    }
    world.flush();

    let mut aims = AimTable::new();
    let mut permissions = PermissionSet::new();
    for player in &scenario.players {
        aims.set(player.id.clone(), player.eyes, player.aim);
        if player.admin {
            permissions.grant(player.id.clone(), admin_permission.clone());
        }
    }

    let mut replies = Vec::with_capacity(scenario.commands.len());
    for spec in &scenario.commands {
        let invoker = spec
            .player
            .clone()
            .map_or(Invoker::Server, Invoker::Player);
        let args: Vec<&str> = spec.args.iter().map(String::as_str).collect();

        let reply = {
            let mut services = HostServices::new(&mut world, &aims, &permissions);
            addon.handle_command(&invoker, &spec.command, &args, &mut services)
        };
        world.flush();

        let invoker = match &invoker {
            Invoker::Server => "server".to_owned(),
            Invoker::Player(id) => id.to_string(),
        };
        info!(
            target: "removals::harness",
            invoker = %invoker,
            command = %spec.command,
            success = reply.is_success(),
            "{}",
            reply.text
        );
        replies.push(ReplyRecord {
            invoker,
            command: spec.command.clone(),
            success: reply.is_success(),
            text: reply.text,
        });
    }

    let zones = handles
        .into_iter()
        .map(|(handle, position)| ZoneRecord {
            handle,
            position,
            data: host.persisted(&addon_name, handle),
            description: host.describe(&addon_name, handle).unwrap_or_default(),
        })
        .collect();

    ScenarioReport {
        registered,
        replies,
        zones,
        removed: world.kill_log().to_vec(),
        survivors: world.alive().map(|entity| entity.id).collect(),
    }
}
