//! Shared data types and serialization for the ecosystem simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod grid;
pub mod snapshot;
pub mod species;
pub mod state;
pub mod timestamp;

pub use event::{generate_event_id, Event, EventPayload, EventType, Subject};
pub use grid::Cell;
pub use snapshot::{
    generate_snapshot_id, CreatureSnapshot, PlantSnapshot, PopulationMetrics, PopulationSnapshot,
};
pub use species::{Diet, Genes, Sex, Species};
pub use state::{ActionState, CauseOfDeath};
pub use timestamp::SimTimestamp;
