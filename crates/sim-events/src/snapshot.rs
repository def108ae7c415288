//! Population Snapshots
//!
//! Point-in-time views of every living entity, written periodically by the
//! driver for inspection. Snapshots are output only; nothing reads them back
//! into a running simulation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::grid::Cell;
use crate::species::{Sex, Species};
use crate::state::ActionState;
use crate::timestamp::SimTimestamp;

/// Generates a snapshot ID for the given tick.
pub fn generate_snapshot_id(tick: u64) -> String {
    format!("snap_{:08}", tick)
}

/// State of one creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: u64,
    pub species: Species,
    pub sex: Sex,
    pub cell: Cell,
    pub action: ActionState,
    pub hunger: f32,
    pub thirst: f32,
    /// True while a tile transition is being animated.
    pub moving: bool,
}

/// State of one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub id: u64,
    pub cell: Cell,
    pub amount_remaining: f32,
}

/// Aggregates computed over a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationMetrics {
    pub counts: BTreeMap<Species, usize>,
    pub actions: BTreeMap<String, usize>,
    pub mean_hunger: f32,
    pub mean_thirst: f32,
    pub total_plant_amount: f32,
}

/// Complete population state at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub timestamp: SimTimestamp,
    pub creatures: Vec<CreatureSnapshot>,
    pub plants: Vec<PlantSnapshot>,
    pub metrics: PopulationMetrics,
}

impl PopulationSnapshot {
    /// Builds a snapshot and computes its metrics.
    pub fn new(
        timestamp: SimTimestamp,
        creatures: Vec<CreatureSnapshot>,
        plants: Vec<PlantSnapshot>,
    ) -> Self {
        let metrics = PopulationMetrics::compute(&creatures, &plants);
        Self {
            snapshot_id: generate_snapshot_id(timestamp.tick),
            timestamp,
            creatures,
            plants,
            metrics,
        }
    }

    pub fn population(&self, species: Species) -> usize {
        self.metrics.counts.get(&species).copied().unwrap_or(0)
    }
}

impl PopulationMetrics {
    pub fn compute(creatures: &[CreatureSnapshot], plants: &[PlantSnapshot]) -> Self {
        let mut metrics = PopulationMetrics::default();

        for creature in creatures {
            *metrics.counts.entry(creature.species).or_default() += 1;
            *metrics.actions.entry(creature.action.to_string()).or_default() += 1;
        }
        if !plants.is_empty() {
            metrics.counts.insert(Species::Plant, plants.len());
        }

        if !creatures.is_empty() {
            let n = creatures.len() as f32;
            metrics.mean_hunger = creatures.iter().map(|c| c.hunger).sum::<f32>() / n;
            metrics.mean_thirst = creatures.iter().map(|c| c.thirst).sum::<f32>() / n;
        }
        metrics.total_plant_amount = plants.iter().map(|p| p.amount_remaining).sum();

        metrics
    }
}
