use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use removals_core::{EntityWorld, PlayerId, Position, Rotation, ZoneHandle};
use tracing::debug;

use crate::api::{AddonData, AddonHost, CapabilityBundle, HandlerBundle};

type PersistedData = Rc<RefCell<BTreeMap<ZoneHandle, AddonData>>>;

struct RegisteredAddon {
    capabilities: CapabilityBundle,
    persisted: PersistedData,
    set_data_calls: Rc<RefCell<usize>>,
}

/// Minimal addon framework: keeps registered bundles and persisted data.
///
/// Placement, editing, and inspection go through the registered callbacks
/// exactly as an operator UI would drive them; `SetData` writes into the
/// in-memory store.
#[derive(Default)]
pub struct MemoryHost {
    addons: HashMap<String, RegisteredAddon>,
    refuse_registration: bool,
    omit_set_data: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that answers every registration with no handler bundle.
    pub fn refusing() -> Self {
        Self {
            refuse_registration: true,
            ..Self::default()
        }
    }

    /// Host whose handler bundle lacks `SetData`.
    pub fn without_set_data() -> Self {
        Self {
            omit_set_data: true,
            ..Self::default()
        }
    }

    pub fn is_registered(&self, addon_name: &str) -> bool {
        self.addons.contains_key(addon_name)
    }

    /// Drops every registration, as when the host plugin unloads.
    pub fn unload(&mut self) {
        self.addons.clear();
    }

    /// Operator begins placing an addon instance.
    pub fn begin_placement(
        &self,
        addon_name: &str,
        player: &PlayerId,
        position: Position,
    ) -> Option<AddonData> {
        let addon = self.addons.get(addon_name)?;
        (addon.capabilities.initialize)(player, position)
    }

    /// Spawns an instance and persists its initial data.
    pub fn place(
        &mut self,
        addon_name: &str,
        world: &mut dyn EntityWorld,
        position: Position,
        rotation: Rotation,
        data: Option<AddonData>,
    ) -> Option<ZoneHandle> {
        let addon = self.addons.get(addon_name)?;
        let handle = (addon.capabilities.spawn)(world, position, rotation, data.as_ref());
        if let Some(data) = data {
            addon.persisted.borrow_mut().insert(handle, data);
        }
        debug!(target: "removals::host", addon = addon_name, zone = %handle, "placed addon");
        Some(handle)
    }

    /// Stores externally edited data and forwards it through `Update`.
    pub fn edit(
        &mut self,
        addon_name: &str,
        world: &mut dyn EntityWorld,
        handle: ZoneHandle,
        data: AddonData,
    ) -> bool {
        let Some(addon) = self.addons.get(addon_name) else {
            return false;
        };
        addon.persisted.borrow_mut().insert(handle, data.clone());
        (addon.capabilities.update)(world, handle, Some(&data));
        true
    }

    /// Kills an instance and forgets its data.
    pub fn remove(&mut self, addon_name: &str, handle: ZoneHandle) -> bool {
        let Some(addon) = self.addons.get(addon_name) else {
            return false;
        };
        (addon.capabilities.kill)(handle);
        addon.persisted.borrow_mut().remove(&handle).is_some()
    }

    /// Inspection text built from the persisted data.
    pub fn describe(&self, addon_name: &str, handle: ZoneHandle) -> Option<String> {
        let addon = self.addons.get(addon_name)?;
        let data = addon.persisted.borrow().get(&handle).cloned();
        let mut buffer = String::new();
        (addon.capabilities.add_display_info)(handle, data.as_ref(), &mut buffer);
        Some(buffer)
    }

    pub fn persisted(&self, addon_name: &str, handle: ZoneHandle) -> Option<AddonData> {
        let addon = self.addons.get(addon_name)?;
        let data = addon.persisted.borrow().get(&handle).cloned();
        data
    }

    /// Number of `SetData` calls received for an addon.
    pub fn set_data_calls(&self, addon_name: &str) -> usize {
        self.addons
            .get(addon_name)
            .map_or(0, |addon| *addon.set_data_calls.borrow())
    }
}

impl AddonHost for MemoryHost {
    fn register_custom_addon(
        &mut self,
        addon_name: &str,
        capabilities: CapabilityBundle,
    ) -> Option<HandlerBundle> {
        if self.refuse_registration {
            return None;
        }

        let persisted = PersistedData::default();
        let set_data_calls = Rc::new(RefCell::new(0));
        self.addons.insert(
            addon_name.to_owned(),
            RegisteredAddon {
                capabilities,
                persisted: Rc::clone(&persisted),
                set_data_calls: Rc::clone(&set_data_calls),
            },
        );

        if self.omit_set_data {
            return Some(HandlerBundle::default());
        }

        Some(HandlerBundle::new(Box::new(
            move |handle: ZoneHandle, data: &AddonData| {
                *set_data_calls.borrow_mut() += 1;
                persisted.borrow_mut().insert(handle, data.clone());
            },
        )))
    }
}
