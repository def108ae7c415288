//! Event Types
//!
//! All event type definitions matching the simulation output schema.
//! Events are written one per line (JSONL) by the simulation driver.

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::species::{Sex, Species};
use crate::state::{ActionState, CauseOfDeath};
use crate::timestamp::SimTimestamp;

/// Primary event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Birth,
    Movement,
    Behavior,
    Feeding,
    Death,
}

impl EventType {
    /// Returns all event type variants.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Birth,
            EventType::Movement,
            EventType::Behavior,
            EventType::Feeding,
            EventType::Death,
        ]
    }
}

/// The living entity an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Stable numeric handle of the entity within the run.
    pub id: u64,
    pub species: Species,
}

impl Subject {
    pub fn new(id: u64, species: Species) -> Self {
        Self { id, species }
    }
}

/// Event-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    /// An entity entered the world.
    Spawned {
        cell: Cell,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sex: Option<Sex>,
    },
    /// A creature finished a one-tile move.
    Moved { from: Cell, to: Cell },
    /// A decision pass or interaction changed the creature's action.
    ActionChanged { from: ActionState, to: ActionState },
    /// A creature fed on a consumable.
    Fed {
        target: Subject,
        requested: f32,
        granted: f32,
    },
    /// An entity left the world.
    Died { cell: Cell, cause: CauseOfDeath },
}

impl EventPayload {
    /// The category this payload belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::Spawned { .. } => EventType::Birth,
            EventPayload::Moved { .. } => EventType::Movement,
            EventPayload::ActionChanged { .. } => EventType::Behavior,
            EventPayload::Fed { .. } => EventType::Feeding,
            EventPayload::Died { .. } => EventType::Death,
        }
    }
}

/// A single simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (e.g., "evt_00042371")
    pub event_id: String,
    /// When the event occurred
    pub timestamp: SimTimestamp,
    /// Primary event category
    pub event_type: EventType,
    /// Entity the event is about
    pub subject: Subject,
    /// Event-specific data
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event; the type is derived from the payload.
    pub fn new(
        event_id: impl Into<String>,
        timestamp: SimTimestamp,
        subject: Subject,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            timestamp,
            event_type: payload.event_type(),
            subject,
            payload,
        }
    }

    /// Serializes the event as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
