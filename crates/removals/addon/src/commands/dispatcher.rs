use std::cell::RefCell;
use std::rc::Rc;

use removals_core::{RecomputeReport, ZoneHandle, ZoneRegistry, normalize_prefab};
use tracing::debug;

use super::{RemoverCommand, ZoneEdit};
use crate::adapter::CapabilityAdapter;
use crate::api::CommandError;
use crate::config::AddonConfig;
use crate::services::{HostServices, Invoker};

/// Result of a successful command.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutcome {
    pub zone: ZoneHandle,
    /// Edit as applied, with prefab names normalized.
    pub edit: ZoneEdit,
    pub report: RecomputeReport,
}

/// Resolves commands to the nearest zone and applies them.
///
/// # Pipeline
///
/// ```text
/// invoker is a player → has admin permission → verb known
///     → addon registered → argument valid → aim point hit
///     → zone within reach → edit + local recompute → host SetData
/// ```
///
/// Every failing stage returns before any state is touched.
pub struct CommandDispatcher {
    config: AddonConfig,
    registry: Rc<RefCell<ZoneRegistry>>,
}

impl CommandDispatcher {
    pub fn new(config: AddonConfig, registry: Rc<RefCell<ZoneRegistry>>) -> Self {
        Self { config, registry }
    }

    /// Runs one operator command.
    ///
    /// The registry borrow is released before the host's `SetData` runs, so
    /// the host may call back into the addon (e.g. `Update`) synchronously.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing the first failed stage. No zone
    /// data changes when an error is returned.
    pub fn execute(
        &self,
        invoker: &Invoker,
        command: &str,
        args: &[&str],
        services: &mut HostServices<'_>,
        adapter: &mut CapabilityAdapter,
    ) -> Result<CommandOutcome, CommandError> {
        let player = invoker.player_id().ok_or(CommandError::PlayerOnly)?;

        if !services
            .permissions
            .has_permission(player, &self.config.admin_permission)
        {
            return Err(CommandError::NoPermission {
                permission: self.config.admin_permission.clone(),
            });
        }

        let verb = RemoverCommand::from_command(&self.config.command_prefix, command)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_owned()))?;

        if !adapter.is_registered() {
            return Err(CommandError::FeatureUnavailable);
        }

        let edit = normalized(verb.parse_edit(command, args)?);

        let aim = services
            .aim
            .aim_point(player, self.config.zone.max_ray_distance)
            .ok_or(CommandError::NoAimPoint)?;

        let target = self
            .registry
            .borrow()
            .nearest(aim, self.config.zone.target_distance_squared())
            .ok_or(CommandError::NoTargetZone)?;

        let (encoded, report) = {
            let mut registry = self.registry.borrow_mut();
            let zone = registry
                .get_mut(target.handle)
                .ok_or(CommandError::NoTargetZone)?;

            let mut data = zone.data().cloned().unwrap_or_default();
            edit.apply(&mut data)
                .map_err(|source| CommandError::InvalidRadius {
                    command: command.to_owned(),
                    source,
                })?;

            // Encode first so a failure cannot leave local and host state apart.
            let encoded = CapabilityAdapter::encode(&data)?;
            let report = zone.set_data(Some(data), &mut *services.world);
            (encoded, report)
        };

        adapter.push_data(target.handle, &encoded)?;

        debug!(
            target: "removals::commands",
            player = %player,
            command,
            zone = %target.handle,
            distance_squared = target.distance_squared,
            killed = report.killed,
            "command applied"
        );

        Ok(CommandOutcome {
            zone: target.handle,
            edit,
            report,
        })
    }
}

fn normalized(edit: ZoneEdit) -> ZoneEdit {
    match edit {
        ZoneEdit::AddPrefab(name) => ZoneEdit::AddPrefab(normalize_prefab(&name)),
        ZoneEdit::RemovePrefab(name) => ZoneEdit::RemovePrefab(normalize_prefab(&name)),
        other => other,
    }
}
