use removals_core::{EntityWorld, PlayerId, Position, Rotation, ZoneHandle};

/// Structured addon configuration exchanged with the host.
///
/// For remover zones the value is shaped `{"Radius": f32, "PrefabNames": [string]}`.
pub type AddonData = serde_json::Value;

/// Called when an operator starts placing a new instance; returns initial data.
pub type InitializeCallback = Box<dyn Fn(&PlayerId, Position) -> Option<AddonData>>;

/// Constructs an instance at the given pose and returns its handle.
pub type SpawnCallback =
    Box<dyn Fn(&mut dyn EntityWorld, Position, Rotation, Option<&AddonData>) -> ZoneHandle>;

/// Destroys an instance.
pub type KillCallback = Box<dyn Fn(ZoneHandle)>;

/// Applies externally edited data to a live instance.
pub type UpdateCallback = Box<dyn Fn(&mut dyn EntityWorld, ZoneHandle, Option<&AddonData>)>;

/// Appends a human-readable summary of an instance to the host's buffer.
pub type AddDisplayInfoCallback = Box<dyn Fn(ZoneHandle, Option<&AddonData>, &mut String)>;

/// Pushes locally edited data into the host's persisted configuration.
pub type SetDataCallback = Box<dyn FnMut(ZoneHandle, &AddonData)>;

/// Callbacks an addon type provides to the host framework.
pub struct CapabilityBundle {
    pub initialize: InitializeCallback,
    pub spawn: SpawnCallback,
    pub kill: KillCallback,
    pub update: UpdateCallback,
    pub add_display_info: AddDisplayInfoCallback,
}

impl CapabilityBundle {
    /// Protocol names of the callbacks, in field order.
    pub const NAMES: [&'static str; 5] = ["Initialize", "Spawn", "Kill", "Update", "AddDisplayInfo"];
}

impl std::fmt::Debug for CapabilityBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBundle")
            .field("callbacks", &Self::NAMES)
            .finish()
    }
}

/// Callbacks the host framework returns from a successful registration.
///
/// `set_data` is optional on the wire; a host that omits it leaves the addon
/// unable to persist edits, which registration treats as a failure.
#[derive(Default)]
pub struct HandlerBundle {
    pub set_data: Option<SetDataCallback>,
}

impl HandlerBundle {
    pub fn new(set_data: SetDataCallback) -> Self {
        Self {
            set_data: Some(set_data),
        }
    }
}

impl std::fmt::Debug for HandlerBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerBundle")
            .field("set_data", &self.set_data.is_some())
            .finish()
    }
}

/// Registration entry point of the host addon framework.
pub trait AddonHost {
    /// Registers a custom addon type under `addon_name`.
    ///
    /// Returns `None` if the host refuses the registration.
    fn register_custom_addon(
        &mut self,
        addon_name: &str,
        capabilities: CapabilityBundle,
    ) -> Option<HandlerBundle>;
}
