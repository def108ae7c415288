//! Simulation Timestamp Types
//!
//! Simulation time is a monotonic tick counter plus the simulated seconds
//! elapsed, since ticks may use any step length.
//!
//! # Example
//!
//! ```
//! use sim_events::SimTimestamp;
//!
//! let mut ts = SimTimestamp::start();
//! ts.advance(0.5);
//! ts.advance(0.5);
//! assert_eq!(ts.tick, 2);
//! assert_eq!(ts.to_string(), "tick_2@1.00s");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimTimestamp {
    /// Monotonically increasing simulation tick.
    pub tick: u64,
    /// Simulated seconds since the start of the run.
    pub seconds: f64,
}

impl SimTimestamp {
    pub fn new(tick: u64, seconds: f64) -> Self {
        Self { tick, seconds }
    }

    /// Creates a timestamp for the start of the simulation.
    pub fn start() -> Self {
        Self::default()
    }

    /// Moves one tick forward, `dt` seconds long.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.seconds += f64::from(dt);
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick_{}@{:.2}s", self.tick, self.seconds)
    }
}
