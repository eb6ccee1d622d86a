use std::io::Write;
use std::path::Path;

use removals_addon::AddonConfig;
use removals_core::EntityId;
use removals_harness::{ScenarioLoader, run};
use serde_json::json;

#[test]
fn bundled_monument_scenario_replays() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/monument.toml");
    let scenario = ScenarioLoader::load(&path).unwrap();

    let report = run(&scenario, AddonConfig::default());

    assert!(report.registered);
    let texts: Vec<&str> = report.replies.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "You don't have permission to do that.",
            "This command can only be run by a player.",
            "Added prefab to remover: assets/bundled/prefabs/radtown/loot_barrel_1.prefab",
            "Added prefab to remover: assets/bundled/prefabs/radtown/loot_barrel_2.prefab",
            "Updated radius for remover: 4",
        ]
    );

    // Barrel 2 sits outside the default radius until the radius grows.
    assert_eq!(report.removed, vec![EntityId(1), EntityId(2)]);
    assert_eq!(report.survivors, vec![EntityId(3), EntityId(4), EntityId(5)]);
    assert_eq!(
        report.zones[0].data,
        Some(json!({
            "Radius": 4.0,
            "PrefabNames": [
                "assets/bundled/prefabs/radtown/loot_barrel_1.prefab",
                "assets/bundled/prefabs/radtown/loot_barrel_2.prefab",
            ],
        }))
    );
}

#[test]
fn scenario_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [[zones]]
        position = {{ x = 0.0, y = 0.0, z = 0.0 }}

        [[players]]
        id = "admin"
        admin = true

        [[commands]]
        player = "admin"
        command = "mar.add"
        args = ["door"]
        "#
    )
    .unwrap();

    let scenario = ScenarioLoader::load(file.path()).unwrap();
    let report = run(&scenario, AddonConfig::default());

    assert_eq!(report.replies.len(), 1);
    assert!(!report.replies[0].success);
    assert_eq!(report.replies[0].text, "No hit");
    assert!(report.zones[0].data.is_none());
}

#[test]
fn missing_file_names_the_path() {
    let err = ScenarioLoader::load(Path::new("/nonexistent/scenario.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/scenario.toml"));
}
