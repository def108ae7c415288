//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every field has a default, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use sim_events::{Diet, Species};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Terrain used when the configuration does not provide one.
///
/// `.` is grass, `~` is water and `#` is rock.
pub const DEFAULT_LAYOUT: &[&str] = &[
    "########################",
    "#......................#",
    "#......................#",
    "#....~~~~..............#",
    "#...~~~~~~.......#.....#",
    "#...~~~~~~.......#.....#",
    "#....~~~~........#.....#",
    "#......................#",
    "#..........~~~.........#",
    "#.........~~~~~........#",
    "#..........~~~.........#",
    "#......................#",
    "#..###.................#",
    "#......................#",
    "#......................#",
    "########################",
];

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub animal: AnimalSettings,
    pub plants: PlantConfig,
    pub world: WorldConfig,
    pub population: Vec<PopulationEntry>,
}

/// Simulation run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub ticks: u64,
    /// Simulated seconds per tick
    pub dt: f32,
    /// Ticks between population snapshots (0 disables them)
    pub snapshot_interval: u64,
    pub output_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 6000,
            dt: 0.1,
            snapshot_interval: 500,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Per-creature behavior constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimalSettings {
    /// Seconds between decision passes while stationary
    pub time_between_action_choices: f32,
    /// Tiles per second for an orthogonal move
    pub move_speed: f32,
    pub time_to_death_by_hunger: f32,
    pub time_to_death_by_thirst: f32,
    /// Seconds of drinking to go from fully thirsty to quenched
    pub drink_duration: f32,
    /// Seconds of eating to go from starving to full
    pub eat_duration: f32,
    /// Thirst above which a feeding creature abandons its meal
    pub critical_percent: f32,
    /// Peak height of the hop between tiles, in world units
    pub move_arc_height: f32,
    /// Sensing radius, in tiles
    pub max_view_distance: i32,
    /// Share of the eater's hunger restored by killing a prey animal
    pub prey_nutrition_fraction: f32,
}

impl Default for AnimalSettings {
    fn default() -> Self {
        Self {
            time_between_action_choices: 1.0,
            move_speed: 1.5,
            time_to_death_by_hunger: 200.0,
            time_to_death_by_thirst: 200.0,
            drink_duration: 6.0,
            eat_duration: 10.0,
            critical_percent: 0.7,
            move_arc_height: 0.2,
            max_view_distance: 10,
            prey_nutrition_fraction: 0.5,
        }
    }
}

/// Plant spawning and regrowth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    pub initial_count: usize,
    /// Food held by a fresh plant
    pub initial_amount: f32,
    /// Ticks between regrowth rounds (0 disables regrowth)
    pub regrow_interval: u64,
    /// Plants added per regrowth round
    pub regrow_count: usize,
    /// Regrowth stops once this many plants are alive
    pub max_plants: usize,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            initial_count: 40,
            initial_amount: 1.0,
            regrow_interval: 50,
            regrow_count: 2,
            max_plants: 80,
        }
    }
}

/// Terrain description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World units between neighbouring tile centres
    pub tile_size: f32,
    /// Rows of the map, top row first
    pub layout: Vec<String>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 1.0,
            layout: DEFAULT_LAYOUT.iter().map(|row| row.to_string()).collect(),
        }
    }
}

/// One group of animals to place at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub species: Species,
    pub count: usize,
    /// Overrides the species' default diet
    #[serde(default)]
    pub diet: Option<Vec<Species>>,
}

impl PopulationEntry {
    pub fn new(species: Species, count: usize) -> Self {
        Self {
            species,
            count,
            diet: None,
        }
    }

    pub fn diet(&self) -> Diet {
        match &self.diet {
            Some(species) => Diet::from_species(species),
            None => self.species.default_diet(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        if config.population.is_empty() {
            config.population = default_population();
        }
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load tuning file: {}. Using defaults.", e);
            Self::with_default_population()
        })
    }

    /// Defaults plus the standard starting population.
    pub fn with_default_population() -> Self {
        Self {
            population: default_population(),
            ..Self::default()
        }
    }
}

fn default_population() -> Vec<PopulationEntry> {
    vec![
        PopulationEntry::new(Species::Rabbit, 12),
        PopulationEntry::new(Species::Fox, 3),
    ]
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
