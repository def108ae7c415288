//! Components
//!
//! Entity state for creatures and plants, and the handles that name them.

pub mod creature;
pub mod handles;
pub mod plant;

pub use creature::Creature;
pub use handles::{CreatureId, FoodRef, HandleTag, PlantId};
pub use plant::Plant;
