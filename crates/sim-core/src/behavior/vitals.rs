//! Vitals
//!
//! Hunger and thirst bookkeeping. Both scalars decay linearly towards 1.0,
//! at which point the creature dies. Acting on death is up to the caller.

use serde::{Deserialize, Serialize};
use sim_events::CauseOfDeath;

use crate::config::AnimalSettings;

/// Hunger and thirst of one creature.
///
/// 0.0 means fully satisfied; 1.0 is lethal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: f32,
    pub thirst: f32,
    time_to_death_by_hunger: f32,
    time_to_death_by_thirst: f32,
}

impl Vitals {
    pub fn new(time_to_death_by_hunger: f32, time_to_death_by_thirst: f32) -> Self {
        Self {
            hunger: 0.0,
            thirst: 0.0,
            time_to_death_by_hunger,
            time_to_death_by_thirst,
        }
    }

    pub fn from_settings(settings: &AnimalSettings) -> Self {
        Self::new(settings.time_to_death_by_hunger, settings.time_to_death_by_thirst)
    }

    /// Starts from the given levels instead of zero.
    pub fn with_levels(mut self, hunger: f32, thirst: f32) -> Self {
        self.hunger = hunger.max(0.0);
        self.thirst = thirst.max(0.0);
        self
    }

    /// Decays both stats by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.hunger += dt / self.time_to_death_by_hunger;
        self.thirst += dt / self.time_to_death_by_thirst;
    }

    pub fn is_lethal(&self) -> bool {
        self.hunger >= 1.0 || self.thirst >= 1.0
    }

    /// Hunger wins when both stats are lethal at once.
    pub fn cause_of_death(&self) -> Option<CauseOfDeath> {
        if self.hunger >= 1.0 {
            Some(CauseOfDeath::Hunger)
        } else if self.thirst >= 1.0 {
            Some(CauseOfDeath::Thirst)
        } else {
            None
        }
    }

    pub fn reduce_hunger(&mut self, amount: f32) {
        self.hunger = (self.hunger - amount).max(0.0);
    }

    pub fn reduce_thirst(&mut self, amount: f32) {
        self.thirst = (self.thirst - amount).clamp(0.0, 1.0);
    }
}
