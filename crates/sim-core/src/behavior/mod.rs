//! Behavior Engine
//!
//! Everything a creature does on its own: vitals decay, route caching, hop
//! animation, the decision policy and eating/drinking. The engine reaches
//! the world only through [`crate::environment::Environment`].

pub mod agent;
pub mod decision;
pub mod interaction;
pub mod movement;
pub mod path;
pub mod vitals;

pub use agent::{activate, die, spawn, tick};
pub use decision::{act, decide, decide_and_act, DecisionPolicy};
pub use interaction::{Consumable, FeedRequest, InteractionHandler};
pub use movement::{MovementController, MovementOutcome, MovementState};
pub use path::PathCache;
pub use vitals::Vitals;
