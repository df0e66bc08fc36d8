//! Hand-off point between a review session and whatever stores its results.
//!
//! The session calls [`ReviewSink::persist`] once per rating with the card's new schedule
//! record and the review event. Storage itself lives outside this crate.

use crate::error::PersistError;
use crate::models::{CardSchedule, ReviewEvent};
use serde::Serialize;
use std::io::Write;

pub trait ReviewSink {
    fn persist(&mut self, update: &CardSchedule, event: &ReviewEvent) -> Result<(), PersistError>;
}

impl<S: ReviewSink + ?Sized> ReviewSink for &mut S {
    fn persist(&mut self, update: &CardSchedule, event: &ReviewEvent) -> Result<(), PersistError> {
        (**self).persist(update, event)
    }
}

/// Keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub updates: Vec<CardSchedule>,
    pub events: Vec<ReviewEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest record per card, in first-seen order.
    pub fn latest_schedules(&self) -> Vec<CardSchedule> {
        let mut latest: Vec<CardSchedule> = Vec::new();
        for update in &self.updates {
            match latest.iter_mut().find(|existing| existing.id == update.id) {
                Some(existing) => *existing = update.clone(),
                None => latest.push(update.clone()),
            }
        }
        latest
    }
}

impl ReviewSink for MemorySink {
    fn persist(&mut self, update: &CardSchedule, event: &ReviewEvent) -> Result<(), PersistError> {
        self.updates.push(update.clone());
        self.events.push(event.clone());
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Line<'a> {
    Schedule(&'a CardSchedule),
    Review(&'a ReviewEvent),
}

/// Writes one JSON object per line: a `schedule` line followed by a `review` line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &Line<'_>) -> Result<(), PersistError> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ReviewSink for JsonLinesSink<W> {
    fn persist(&mut self, update: &CardSchedule, event: &ReviewEvent) -> Result<(), PersistError> {
        self.write_line(&Line::Schedule(update))?;
        self.write_line(&Line::Review(event))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, ScheduleState};
    use chrono::{TimeZone, Utc};

    fn sample() -> (CardSchedule, ReviewEvent) {
        let now = Utc.with_ymd_and_hms(2024, 4, 4, 10, 0, 0).unwrap();
        let prior = ScheduleState::new_card(now);
        let next = ScheduleState {
            interval: 4.0,
            ease_factor: 2.65,
            due_at: now,
        };
        (
            CardSchedule::new(12, next),
            ReviewEvent::new(12, Rating::Easy, &prior, &next, Some(800), now),
        )
    }

    #[test]
    fn test_memory_sink_keeps_latest() {
        let (mut update, event) = sample();
        let mut sink = MemorySink::new();
        sink.persist(&update, &event).unwrap();
        update.state.interval = 11.0;
        sink.persist(&update, &event).unwrap();

        assert_eq!(sink.events.len(), 2);
        let latest = sink.latest_schedules();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].state.interval, 11.0);
    }

    #[test]
    fn test_json_lines_format() {
        let (update, event) = sample();
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.persist(&update, &event).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "schedule");
        assert_eq!(lines[0]["id"], 12);
        assert_eq!(lines[0]["interval"], 4.0);
        assert_eq!(lines[1]["type"], "review");
        assert_eq!(lines[1]["rating"], 3);
        assert_eq!(lines[1]["think_time_ms"], 800);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let (update, event) = sample();
        let mut sink = JsonLinesSink::new(BrokenWriter);
        assert!(sink.persist(&update, &event).is_err());
    }
}
