//! World Setup
//!
//! Terrain loading, initial plant cover and creature spawning.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::BTreeMap;

use sim_events::{Genes, Sex, Species};

use crate::config::Config;
use crate::environment::{CreatureSpec, Ecosystem, TerrainMap};
use crate::error::SetupError;

/// Counts of what was placed at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnSummary {
    pub plants: usize,
    pub by_species: BTreeMap<Species, usize>,
}

impl SpawnSummary {
    pub fn total_creatures(&self) -> usize {
        self.by_species.values().sum()
    }
}

/// Builds the world described by `config`: terrain, plants, then every
/// population entry, each creature on a random free cell with a random sex.
pub fn build_ecosystem(
    config: &Config,
    rng: &mut SmallRng,
) -> Result<(Ecosystem, SpawnSummary), SetupError> {
    let terrain = TerrainMap::from_layout(&config.world.layout, config.world.tile_size)?;
    let mut ecosystem = Ecosystem::new(
        terrain,
        config.animal,
        config.plants.clone(),
        rng.gen(),
    );
    let mut summary = SpawnSummary::default();

    for _ in 0..config.plants.initial_count {
        let Some(cell) = ecosystem.random_free_cell() else {
            tracing::warn!(
                placed = summary.plants,
                requested = config.plants.initial_count,
                "ran out of free cells for plants"
            );
            break;
        };
        if ecosystem
            .spawn_plant(cell, config.plants.initial_amount)
            .is_some()
        {
            summary.plants += 1;
        }
    }

    for entry in &config.population {
        let diet = entry.diet();
        for _ in 0..entry.count {
            let cell = ecosystem
                .random_free_cell()
                .ok_or(SetupError::NoFreeCell {
                    species: entry.species,
                })?;
            let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
            let spec = CreatureSpec::new(entry.species, cell, Genes::new(sex)).with_diet(diet);
            ecosystem.spawn_creature(spec);
            *summary.by_species.entry(entry.species).or_default() += 1;
        }
    }

    tracing::info!(
        plants = summary.plants,
        creatures = summary.total_creatures(),
        "world populated"
    );
    Ok((ecosystem, summary))
}
