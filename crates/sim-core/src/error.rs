//! Error Types
//!
//! Failures while building or running a simulation. The behavior engine
//! itself never fails; these cover configuration, world setup and output.

use std::path::PathBuf;

use sim_events::Species;
use thiserror::Error;

use crate::config::ConfigError;
use crate::environment::TerrainError;

/// World construction failed.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid terrain: {0}")]
    Terrain(#[from] TerrainError),
    #[error("no free walkable cell left to place a {species:?}")]
    NoFreeCell { species: Species },
}

/// Top-level error returned by the `ecosim` binary.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("could not write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
