//! Registration handshake with the host addon framework.
//!
//! The adapter builds the five capability callbacks over the shared
//! [`ZoneRegistry`], hands them to the host, and keeps the `SetData` callback
//! the host returns. Without a retained `SetData` the addon is considered
//! unregistered and every command reports the feature as unavailable.
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use removals_core::{
    EntityWorld, PlayerId, Position, Rotation, ZoneData, ZoneHandle, ZoneRegistry,
};
use serde::Deserialize as _;
use tracing::{error, info, warn};

use crate::api::{
    AddonData, AddonHost, CapabilityBundle, CommandError, RegistrationError, SetDataCallback,
};

/// Bridges remover zones into the host's custom-addon protocol.
pub struct CapabilityAdapter {
    addon_name: String,
    registry: Rc<RefCell<ZoneRegistry>>,
    set_data: Option<SetDataCallback>,
}

impl CapabilityAdapter {
    pub fn new(addon_name: impl Into<String>, registry: Rc<RefCell<ZoneRegistry>>) -> Self {
        Self {
            addon_name: addon_name.into(),
            registry,
            set_data: None,
        }
    }

    pub fn addon_name(&self) -> &str {
        &self.addon_name
    }

    /// True once the host has returned a `SetData` callback.
    pub fn is_registered(&self) -> bool {
        self.set_data.is_some()
    }

    /// Performs the registration handshake.
    ///
    /// Any previously retained `SetData` is dropped first: it belongs to the
    /// host instance being replaced.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Rejected` if the host returns no handler
    /// bundle and `RegistrationError::MissingSetData` if the bundle lacks
    /// `SetData`. The addon stays unregistered in both cases.
    pub fn register(&mut self, host: &mut dyn AddonHost) -> Result<(), RegistrationError> {
        self.set_data = None;

        let Some(handler) = host.register_custom_addon(&self.addon_name, self.capabilities())
        else {
            error!(
                target: "removals::adapter",
                addon = %self.addon_name,
                "Error registering addon with host framework"
            );
            return Err(RegistrationError::Rejected {
                addon: self.addon_name.clone(),
            });
        };

        let Some(set_data) = handler.set_data else {
            error!(
                target: "removals::adapter",
                addon = %self.addon_name,
                "SetData method not returned"
            );
            return Err(RegistrationError::MissingSetData {
                addon: self.addon_name.clone(),
            });
        };

        self.set_data = Some(set_data);
        info!(target: "removals::adapter", addon = %self.addon_name, "registered custom addon");
        Ok(())
    }

    /// Encodes zone data into the host's wire shape.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Encode` if serialization fails.
    pub fn encode(data: &ZoneData) -> Result<AddonData, CommandError> {
        serde_json::to_value(data).map_err(CommandError::Encode)
    }

    /// Pushes edited data into the host's persisted configuration.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::FeatureUnavailable` if registration has not succeeded.
    pub fn push_data(&mut self, handle: ZoneHandle, data: &AddonData) -> Result<(), CommandError> {
        let set_data = self
            .set_data
            .as_mut()
            .ok_or(CommandError::FeatureUnavailable)?;
        set_data(handle, data);
        Ok(())
    }

    /// Builds the callback bundle handed to the host.
    pub fn capabilities(&self) -> CapabilityBundle {
        CapabilityBundle {
            initialize: Box::new(initialize),
            spawn: {
                let registry = Rc::clone(&self.registry);
                Box::new(
                    move |world: &mut dyn EntityWorld,
                          position: Position,
                          _rotation: Rotation,
                          data: Option<&AddonData>| {
                        let data = decode(data);
                        let (handle, _) = registry.borrow_mut().spawn(position, data, world);
                        handle
                    },
                )
            },
            kill: {
                let registry = Rc::clone(&self.registry);
                Box::new(move |handle: ZoneHandle| {
                    if registry.borrow_mut().despawn(handle).is_none() {
                        warn!(
                            target: "removals::adapter",
                            zone = %handle,
                            "kill for unknown zone ignored"
                        );
                    }
                })
            },
            update: {
                let registry = Rc::clone(&self.registry);
                Box::new(
                    move |world: &mut dyn EntityWorld, handle: ZoneHandle, data: Option<&AddonData>| {
                        let data = decode(data);
                        let mut registry = registry.borrow_mut();
                        match registry.get_mut(handle) {
                            Some(zone) => {
                                zone.set_data(data, world);
                            }
                            None => {
                                warn!(
                                    target: "removals::adapter",
                                    zone = %handle,
                                    "update for unknown zone ignored"
                                );
                            }
                        }
                    },
                )
            },
            add_display_info: {
                let registry = Rc::clone(&self.registry);
                Box::new(
                    move |handle: ZoneHandle, data: Option<&AddonData>, buffer: &mut String| {
                        if !registry.borrow().contains(handle) {
                            return;
                        }
                        if let Some(data) = decode(data) {
                            describe(&data, buffer);
                        }
                    },
                )
            },
        }
    }
}

fn initialize(_player: &PlayerId, _position: Position) -> Option<AddonData> {
    // Zones start unconfigured; operators fill them in with commands.
    None
}

/// Decodes host data, treating absent, null, and malformed values as "no configuration".
fn decode(data: Option<&AddonData>) -> Option<ZoneData> {
    let value = data.filter(|value| !value.is_null())?;
    match ZoneData::deserialize(value) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!(target: "removals::adapter", error = %err, "ignoring malformed zone data");
            None
        }
    }
}

/// Appends the inspection summary for a zone.
pub fn describe(data: &ZoneData, buffer: &mut String) {
    let _ = writeln!(buffer, "Radius: {}", data.radius());
    let _ = writeln!(buffer, "Prefabs to remove:");
    for prefab in data.prefab_names() {
        let _ = writeln!(buffer, "{prefab}");
    }
}
