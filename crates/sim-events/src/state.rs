//! Behavior States
//!
//! The creature action state machine and the ways a creature can leave it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level behavior a creature is currently engaged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Exploring,
    GoingToFood,
    Eating,
    GoingToWater,
    Drinking,
    AvoidingPredator,
}

impl ActionState {
    /// States in which the creature keeps stepping across tiles.
    pub fn is_travelling(self) -> bool {
        matches!(
            self,
            ActionState::Exploring
                | ActionState::GoingToFood
                | ActionState::GoingToWater
                | ActionState::AvoidingPredator
        )
    }

    /// States in which the creature stays put and drains a resource.
    pub fn is_interacting(self) -> bool {
        matches!(self, ActionState::Eating | ActionState::Drinking)
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionState::Exploring => "exploring",
            ActionState::GoingToFood => "going_to_food",
            ActionState::Eating => "eating",
            ActionState::GoingToWater => "going_to_water",
            ActionState::Drinking => "drinking",
            ActionState::AvoidingPredator => "avoiding_predator",
        };
        f.write_str(label)
    }
}

/// Why a living entity left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfDeath {
    Hunger,
    Thirst,
    /// Killed and eaten by a predator, or a plant grazed to nothing.
    Eaten,
}

impl fmt::Display for CauseOfDeath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CauseOfDeath::Hunger => write!(f, "hunger"),
            CauseOfDeath::Thirst => write!(f, "thirst"),
            CauseOfDeath::Eaten => write!(f, "eaten"),
        }
    }
}
