//! Output Generation
//!
//! Periodic population snapshots written as pretty JSON under
//! `<output_dir>/snapshots/`, plus a `current_state.json` that always holds
//! the latest one.

use bevy_ecs::prelude::Resource;
use std::fs;
use std::path::{Path, PathBuf};

use sim_events::PopulationSnapshot;

use crate::error::SimError;

/// Resource to track snapshot generation
#[derive(Resource)]
pub struct SnapshotWriter {
    dir: PathBuf,
    snapshot_interval: u64,
    written: u64,
}

impl SnapshotWriter {
    /// Creates `<output_dir>/snapshots` if needed.
    pub fn new(output_dir: impl AsRef<Path>, snapshot_interval: u64) -> Result<Self, SimError> {
        let dir = output_dir.as_ref().to_path_buf();
        let snapshots = dir.join("snapshots");
        fs::create_dir_all(&snapshots).map_err(|source| SimError::Output {
            path: snapshots,
            source,
        })?;
        Ok(Self {
            dir,
            snapshot_interval,
            written: 0,
        })
    }

    /// Snapshots are due on every multiple of the interval; an interval of
    /// zero disables periodic snapshots.
    pub fn should_snapshot(&self, tick: u64) -> bool {
        self.snapshot_interval > 0 && tick % self.snapshot_interval == 0
    }

    /// Writes the snapshot and refreshes `current_state.json`.
    pub fn write(&mut self, snapshot: &PopulationSnapshot) -> Result<PathBuf, SimError> {
        let path = self
            .dir
            .join("snapshots")
            .join(format!("snapshot_{:06}.json", snapshot.timestamp.tick));
        write_snapshot(snapshot, &path)?;
        write_snapshot(snapshot, self.dir.join("current_state.json"))?;
        self.written += 1;
        Ok(path)
    }

    pub fn snapshot_count(&self) -> u64 {
        self.written
    }
}

/// Write snapshot to file
pub fn write_snapshot(snapshot: &PopulationSnapshot, path: impl AsRef<Path>) -> Result<(), SimError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(|source| SimError::Output {
        path: path.to_path_buf(),
        source,
    })
}
