//! Event Logger
//!
//! Append-only JSONL event logging.

use bevy_ecs::prelude::Resource;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use sim_events::{Event, EventType};

/// Resource for logging events to a JSONL file
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    by_type: HashMap<EventType, u64>,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            by_type: HashMap::new(),
        })
    }

    /// Create a logger that discards events (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            by_type: HashMap::new(),
        }
    }

    /// Get the current event count
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Events logged so far of one type
    pub fn count_of(&self, event_type: EventType) -> u64 {
        self.by_type.get(&event_type).copied().unwrap_or(0)
    }

    /// Log an event to the file
    pub fn log(&mut self, event: &Event) -> std::io::Result<()> {
        self.event_count += 1;
        *self.by_type.entry(event.event_type).or_default() += 1;
        if let Some(ref mut writer) = self.writer {
            let json = event.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Log multiple events
    pub fn log_batch(&mut self, events: &[Event]) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event logger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_events::{Cell, EventPayload, SimTimestamp, Species, Subject};
    use std::io::BufRead;

    fn moved(id: &str) -> Event {
        Event::new(
            id,
            SimTimestamp::new(3, 0.3),
            Subject::new(7, Species::Rabbit),
            EventPayload::Moved {
                from: Cell::new(1, 1),
                to: Cell::new(2, 1),
            },
        )
    }

    #[test]
    fn test_event_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        logger.log(&moved("evt_00000001")).unwrap();
        logger.flush().unwrap();

        let file = File::open(&path).unwrap();
        let reader = std::io::BufReader::new(file);
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 1);

        let parsed = Event::from_jsonl(&lines[0]).unwrap();
        assert_eq!(parsed.event_id, "evt_00000001");
        assert_eq!(parsed.subject.id, 7);
        assert_eq!(parsed.event_type, EventType::Movement);
    }

    #[test]
    fn test_null_logger() {
        let mut logger = EventLogger::null();

        // Should succeed without actually writing
        logger.log_batch(&[moved("evt_1"), moved("evt_2")]).unwrap();
        assert_eq!(logger.event_count(), 2);
        assert_eq!(logger.count_of(EventType::Movement), 2);
        assert_eq!(logger.count_of(EventType::Death), 0);
    }
}
