//! Event Output
//!
//! The schema lives in `sim_events`; this module writes it out.

pub mod logger;

pub use logger::EventLogger;
