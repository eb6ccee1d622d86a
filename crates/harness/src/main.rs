//! Replays remover-zone scenarios against an in-memory host.
//!
//! Run with: `cargo run -p removals-harness -- scenarios/monument.toml`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use removals_addon::AddonConfig;
use removals_harness::{ScenarioLoader, logging, run};

/// Replay a remover-zone scenario
#[derive(Parser)]
#[command(name = "removals-harness")]
#[command(about = "Replays remover-zone scenarios against an in-memory host", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_dir = std::env::var_os("REMOVALS_LOG_DIR").map(PathBuf::from);
    let _guard = logging::init(log_dir.as_deref())?;

    let config = AddonConfig::from_env();
    let scenario = ScenarioLoader::load(&cli.scenario)?;
    let report = run(&scenario, config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.registered {
        println!("addon not registered, commands are disabled");
    }
    for reply in &report.replies {
        let status = if reply.success { "ok" } else { "err" };
        println!("[{status}] {} {}: {}", reply.invoker, reply.command, reply.text);
    }
    for zone in &report.zones {
        println!("{} at {}", zone.handle, zone.position);
        for line in zone.description.lines() {
            println!("  {line}");
        }
    }
    println!(
        "removed {} entities, {} remain",
        report.removed.len(),
        report.survivors.len()
    );

    Ok(())
}
