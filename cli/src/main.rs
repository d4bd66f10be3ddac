//! `creatorops` — presentation shell over the dashboard engine.
//!
//! Loads a `DataSet` JSON file, applies the user's facet selections, and
//! renders the engine's output. All validation of dates and JSON happens
//! here, at the boundary; the engine only ever sees well-formed records.
//!
//! ## Commands
//!
//! - `creatorops creators --data FILE [facet flags...]`
//! - `creatorops deliverables --data FILE [--on YYYY-MM-DD]`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use creatorops_engine::{DashboardEngine, DataSet, EngineConfig};
use std::path::{Path, PathBuf};

mod creators_cmd;
mod deliverables_cmd;

#[derive(Debug, Parser)]
#[command(name = "creatorops", version, about = "Creator-ops dashboard views")]
struct Cli {
    /// Path to the dataset JSON file
    #[arg(long, global = true, default_value = "data.json")]
    data: PathBuf,

    /// Engine config TOML (defaults to ~/.config/creatorops/engine.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse the creator database with facet filters.
    Creators(creators_cmd::CreatorsArgs),
    /// Track campaign deliverable deadlines.
    Deliverables(deliverables_cmd::DeliverablesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = match &cli.config {
        Some(path) => DashboardEngine::with_config(EngineConfig::load_from_path(path)?)?,
        None => DashboardEngine::new()?,
    };
    let data = load_dataset(&cli.data)?;

    match cli.command {
        Command::Creators(args) => creators_cmd::run(&engine, &data, &args),
        Command::Deliverables(args) => deliverables_cmd::run(&engine, &data, &args),
    }
}

fn load_dataset(path: &Path) -> Result<DataSet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset at {}", path.display()))?;
    let data: DataSet = serde_json::from_str(&contents)
        .with_context(|| format!("malformed dataset at {}", path.display()))?;
    tracing::debug!(
        creators = data.creators.len(),
        submissions = data.submissions.len(),
        deliverables = data.deliverables.len(),
        "dataset loaded"
    );
    Ok(data)
}
