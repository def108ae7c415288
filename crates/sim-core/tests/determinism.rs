//! Determinism verification tests
//!
//! Tests to ensure the simulation produces identical results given the same seed.

use std::fs;
use std::path::Path;

use sim_core::config::Config;
use sim_core::events::EventLogger;
use sim_core::output::SnapshotWriter;
use sim_core::simulation::EVENTS_FILE;
use sim_core::Simulation;
use sim_events::{Event, PopulationSnapshot};

const TICKS: u64 = 400;

fn config_with_seed(seed: u64) -> Config {
    let mut config = Config::with_default_population();
    config.simulation.seed = seed;
    config.simulation.snapshot_interval = 100;
    config
}

/// Runs a full simulation into `dir` and returns the final population.
fn run_into(dir: &Path, config: &Config) -> PopulationSnapshot {
    let logger = EventLogger::new(dir.join(EVENTS_FILE)).unwrap();
    let snapshots = SnapshotWriter::new(dir, config.simulation.snapshot_interval).unwrap();
    let mut simulation = Simulation::new(config, logger, Some(snapshots)).unwrap();
    simulation.run(TICKS);
    simulation.flush().unwrap();
    simulation.ecosystem().snapshot()
}

fn read_events(dir: &Path) -> Vec<Event> {
    fs::read_to_string(dir.join(EVENTS_FILE))
        .unwrap()
        .lines()
        .map(|line| Event::from_jsonl(line).unwrap())
        .collect()
}

/// Same seed, same event stream and same final population
#[test]
fn test_same_seed_same_run() {
    let config = config_with_seed(42);
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = run_into(first.path(), &config);
    let b = run_into(second.path(), &config);

    assert_eq!(a, b, "Final snapshots should be identical with same seed");
    let events_a = fs::read_to_string(first.path().join(EVENTS_FILE)).unwrap();
    let events_b = fs::read_to_string(second.path().join(EVENTS_FILE)).unwrap();
    assert!(!events_a.is_empty());
    assert_eq!(events_a, events_b, "Event logs should be identical with same seed");
}

/// Different seeds place and move creatures differently
#[test]
fn test_different_seeds_diverge() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    run_into(first.path(), &config_with_seed(42));
    run_into(second.path(), &config_with_seed(43));

    assert_ne!(read_events(first.path()), read_events(second.path()));
}

/// Event ids are sequential and timestamps never go backwards
#[test]
fn test_event_stream_is_ordered() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path(), &config_with_seed(7));

    let events = read_events(dir.path());
    assert!(!events.is_empty());
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.event_id, sim_events::generate_event_id(i as u64 + 1));
    }
    for pair in events.windows(2) {
        assert!(pair[0].timestamp.tick <= pair[1].timestamp.tick);
    }
}

/// Snapshots land on every interval, starting with tick 0
#[test]
fn test_periodic_snapshots_written() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path(), &config_with_seed(42));

    for tick in [0u64, 100, 200, 300, 400] {
        let path = dir
            .path()
            .join("snapshots")
            .join(format!("snapshot_{:06}.json", tick));
        assert!(path.exists(), "missing {}", path.display());
        let snapshot: PopulationSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(snapshot.timestamp.tick, tick);
    }
    assert!(dir.path().join("current_state.json").exists());
}
