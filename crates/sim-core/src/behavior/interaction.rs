//! Interactions
//!
//! Eating and drinking once the creature stands next to its target. Vitals
//! keep decaying in the same tick; these only subtract what was obtained.

use sim_events::ActionState;

use crate::components::{Creature, CreatureId};
use crate::config::AnimalSettings;
use crate::environment::Environment;

/// A feeding attempt, passed to the food being eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedRequest {
    pub eater: CreatureId,
    /// Nutrition asked for this tick
    pub amount: f32,
    /// Hunger of the eater before feeding
    pub eater_hunger: f32,
}

/// Capability of anything that yields a bounded amount of nutrition.
///
/// The consumable owns the accounting: the total it grants across all eaters
/// never exceeds what it holds.
pub trait Consumable {
    fn is_alive(&self) -> bool;

    /// Gives up nutrition and returns how much was actually granted.
    fn consume(&mut self, request: FeedRequest) -> f32;
}

/// Per-creature feeding rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionHandler {
    /// Seconds to eat from fully starving to full
    pub eat_duration: f32,
    /// Seconds to drink from fully thirsty to quenched
    pub drink_duration: f32,
}

impl InteractionHandler {
    pub fn from_settings(settings: &AnimalSettings) -> Self {
        Self {
            eat_duration: settings.eat_duration,
            drink_duration: settings.drink_duration,
        }
    }
}

/// Runs one tick of eating or drinking. Anything else is a no-op, as is a
/// vanished or out-of-reach food target; the next decision pass redirects
/// the creature.
pub fn handle<E: Environment + ?Sized>(creature: &mut Creature, dt: f32, env: &mut E) {
    let handler = creature.interaction;
    match creature.action {
        ActionState::Eating => {
            let Some(food) = creature.food_target else {
                return;
            };
            if creature.vitals.hunger <= 0.0 {
                return;
            }
            // Prey may have hopped away since the meal started
            match env.food_cell(food) {
                Some(cell) if creature.position.is_neighbour(cell) => {}
                _ => return,
            }
            let request = FeedRequest {
                eater: creature.id(),
                amount: creature.vitals.hunger.min(dt / handler.eat_duration),
                eater_hunger: creature.vitals.hunger,
            };
            match env.feed_on(food, request) {
                Some(granted) => creature.vitals.reduce_hunger(granted),
                None => tracing::trace!(creature = ?creature.id(), "food target vanished mid-meal"),
            }
        }
        ActionState::Drinking => {
            if creature.vitals.thirst > 0.0 {
                creature.vitals.reduce_thirst(dt / handler.drink_duration);
            }
        }
        _ => {}
    }
}
