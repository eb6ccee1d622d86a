//! Hosts that call back into the addon from inside `SetData`.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use removals_addon::{
    AddonConfig, AddonData, AddonHost, AimTable, CapabilityAdapter, CapabilityBundle,
    HandlerBundle, HostServices, InMemoryWorld, Invoker, PermissionSet, RemovalsAddon,
};
use removals_core::{EntityId, HostEntity, PlayerId, Position, Rotation, ZoneHandle};

const ADMIN: &str = "admin";

/// Host that applies every `SetData` to its own copy of the world through
/// the addon's `Update` callback before returning.
#[derive(Default)]
struct EchoHost {
    capabilities: Rc<RefCell<Option<CapabilityBundle>>>,
    persisted: Rc<RefCell<BTreeMap<ZoneHandle, AddonData>>>,
    mirror: Rc<RefCell<InMemoryWorld>>,
}

impl EchoHost {
    fn spawn(&self, world: &mut InMemoryWorld, position: Position) -> ZoneHandle {
        let capabilities = self.capabilities.borrow();
        let bundle = capabilities.as_ref().expect("registered");
        (bundle.spawn)(world, position, Rotation::IDENTITY, None)
    }
}

impl AddonHost for EchoHost {
    fn register_custom_addon(
        &mut self,
        _addon_name: &str,
        capabilities: CapabilityBundle,
    ) -> Option<HandlerBundle> {
        *self.capabilities.borrow_mut() = Some(capabilities);

        let capabilities = Rc::clone(&self.capabilities);
        let persisted = Rc::clone(&self.persisted);
        let mirror = Rc::clone(&self.mirror);
        Some(HandlerBundle::new(Box::new(
            move |handle: ZoneHandle, data: &AddonData| {
                persisted.borrow_mut().insert(handle, data.clone());
                if let Some(bundle) = capabilities.borrow().as_ref() {
                    (bundle.update)(&mut *mirror.borrow_mut(), handle, Some(data));
                }
            },
        )))
    }
}

#[test]
fn update_from_inside_set_data_does_not_conflict() {
    let mut host = EchoHost::default();
    host.mirror
        .borrow_mut()
        .insert(HostEntity::new(EntityId(1), "box", Position::ORIGIN));

    let mut addon = RemovalsAddon::new(AddonConfig::default());
    {
        let host: &mut dyn AddonHost = &mut host;
        addon.on_server_initialized(Some(host)).unwrap();
    }

    let mut world = InMemoryWorld::with_entities([HostEntity::new(
        EntityId(1),
        "box",
        Position::ORIGIN,
    )]);
    let zone = host.spawn(&mut world, Position::ORIGIN);

    let player = PlayerId::new(ADMIN);
    let mut aims = AimTable::new();
    aims.set(player.clone(), Position::ORIGIN, Some(Position::ORIGIN));
    let mut permissions = PermissionSet::new();
    permissions.grant(player, AddonConfig::DEFAULT_ADMIN_PERMISSION);

    let reply = {
        let mut services = HostServices::new(&mut world, &aims, &permissions);
        addon.handle_command(&Invoker::player(ADMIN), "mar.add", &["BOX"], &mut services)
    };
    assert!(reply.is_success(), "{}", reply.text);

    // Local recompute and the host-driven recompute both ran.
    assert!(!world.is_alive(EntityId(1)));
    assert!(!host.mirror.borrow().is_alive(EntityId(1)));

    let local = addon.zone_data(zone).unwrap();
    assert_eq!(local.prefab_names().collect::<Vec<_>>(), vec!["box"]);
    assert_eq!(
        host.persisted.borrow().get(&zone).cloned(),
        Some(CapabilityAdapter::encode(&local).unwrap())
    );
}
