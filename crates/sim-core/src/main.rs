//! Ecosystem Simulation
//!
//! Runs a seeded, tick-driven ecosystem and writes the event log and
//! population snapshots to the output directory.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sim_core::config::{Config, DEFAULT_TUNING_PATH};
use sim_core::events::EventLogger;
use sim_core::output::SnapshotWriter;
use sim_core::simulation::EVENTS_FILE;
use sim_core::{SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "ecosim")]
#[command(about = "A tile-grid ecosystem of rabbits, foxes and plants")]
struct Args {
    /// Tuning file to load
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility (overrides the tuning file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (overrides the tuning file)
    #[arg(long)]
    ticks: Option<u64>,

    /// Directory for events and snapshots (overrides the tuning file)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::load_or_default(&args.config)
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.simulation.ticks = ticks;
    }
    if let Some(dir) = args.output_dir {
        config.simulation.output_dir = dir;
    }

    let output_dir = config.simulation.output_dir.clone();
    tracing::info!(
        seed = config.simulation.seed,
        ticks = config.simulation.ticks,
        dt = config.simulation.dt,
        output = %output_dir.display(),
        "starting ecosystem simulation"
    );

    let snapshots = SnapshotWriter::new(&output_dir, config.simulation.snapshot_interval)?;
    let events_path = output_dir.join(EVENTS_FILE);
    let logger = EventLogger::new(&events_path).map_err(|source| SimError::Output {
        path: events_path.clone(),
        source,
    })?;

    let mut simulation = Simulation::new(&config, logger, Some(snapshots))?;
    let summary = simulation.spawn_summary();
    for (species, count) in &summary.by_species {
        tracing::info!(?species, count, "spawned");
    }

    simulation.run(config.simulation.ticks);
    simulation.write_final_snapshot()?;
    simulation.flush()?;

    tracing::info!(
        ticks = simulation.current_tick(),
        events = simulation.logger().event_count(),
        snapshots = simulation.snapshots().map_or(0, SnapshotWriter::snapshot_count),
        "simulation complete"
    );
    Ok(())
}
