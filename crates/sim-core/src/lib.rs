//! Ecosystem Simulation Engine
//!
//! Creatures on a tile grid balancing hunger, thirst and predators. The
//! behavior engine lives in [`behavior`] and sees the world only through the
//! [`environment::Environment`] trait; [`environment::Ecosystem`] is the
//! world the binary drives through a `bevy_ecs` schedule.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod behavior;
pub mod components;
pub mod config;
pub mod environment;
pub mod error;
pub mod events;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{Creature, CreatureId, FoodRef, Plant, PlantId};
pub use config::{Config, ConfigError};
pub use environment::{CreatureSpec, Ecosystem, Environment};
pub use error::{SetupError, SimError};
pub use simulation::Simulation;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
