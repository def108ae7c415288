//! Plant Components
//!
//! Stationary food. A plant shrinks as it is grazed and is removed from the
//! world once nothing is left.

use sim_events::Cell;

use crate::behavior::interaction::{Consumable, FeedRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub cell: Cell,
    amount_remaining: f32,
}

impl Plant {
    pub fn new(cell: Cell, amount: f32) -> Self {
        Self {
            cell,
            amount_remaining: amount.max(0.0),
        }
    }

    pub fn amount_remaining(&self) -> f32 {
        self.amount_remaining
    }

    pub fn is_depleted(&self) -> bool {
        self.amount_remaining <= 0.0
    }
}

impl Consumable for Plant {
    fn is_alive(&self) -> bool {
        !self.is_depleted()
    }

    fn consume(&mut self, request: FeedRequest) -> f32 {
        let granted = request.amount.clamp(0.0, self.amount_remaining);
        self.amount_remaining -= granted;
        granted
    }
}
