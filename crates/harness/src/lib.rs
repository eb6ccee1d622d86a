//! Scenario replay for the remover addon.
//!
//! A scenario is a TOML file describing a world (entities), the zones the
//! host framework spawns at startup, the players with their aim, and a list
//! of commands. [`run`] replays it against [`removals_addon::MemoryHost`] and
//! reports every reply together with the entities that were removed.
pub mod logging;
pub mod runner;
pub mod scenario;

pub use runner::{ReplyRecord, ScenarioReport, ZoneRecord, run};
pub use scenario::{CommandSpec, PlayerSpec, Scenario, ScenarioLoader, ZoneSpec};
