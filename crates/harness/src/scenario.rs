//! Scenario file format and loader.
use std::path::Path;

use removals_core::{HostEntity, PlayerId, Position, Rotation};
use serde::Deserialize;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// World, zones, players, and commands replayed by the harness.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub entities: Vec<HostEntity>,
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// Zone instance the host framework spawns at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct ZoneSpec {
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    /// Persisted addon data, in the host's `{Radius, PrefabNames}` shape.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerSpec {
    pub id: PlayerId,
    /// Grants the addon's admin permission.
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub eyes: Position,
    /// Solid point under the crosshair; absent means the ray hits nothing.
    #[serde(default)]
    pub aim: Option<Position>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommandSpec {
    /// Issuing player; absent means the server console.
    #[serde(default)]
    pub player: Option<PlayerId>,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Loader for scenario TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scenario {}: {}", path.display(), e))
    }

    /// Parse a scenario from TOML text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))
    }
}

fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
