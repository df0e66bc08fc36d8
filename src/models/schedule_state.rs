use crate::error::ScheduleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CardId = i64;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const INITIAL_INTERVAL_DAYS: f64 = 1.0;

/// Per-card spaced repetition state. Only the scheduler produces new values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub interval: f64,
    pub ease_factor: f64,
    pub due_at: DateTime<Utc>,
}

impl ScheduleState {
    /// State of a freshly added card: due immediately.
    pub fn new_card(now: DateTime<Utc>) -> Self {
        Self {
            interval: INITIAL_INTERVAL_DAYS,
            ease_factor: INITIAL_EASE_FACTOR,
            due_at: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// No meaningful history yet: never reviewed successfully, or just reset.
    pub fn is_new(&self) -> bool {
        self.interval <= 1.0
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.interval.is_finite() || self.interval < 0.0 {
            return Err(ScheduleError::InvalidState(format!(
                "interval must be a non-negative number, got {}",
                self.interval
            )));
        }
        if !self.ease_factor.is_finite() || self.ease_factor < 0.0 {
            return Err(ScheduleError::InvalidState(format!(
                "ease factor must be a non-negative number, got {}",
                self.ease_factor
            )));
        }
        Ok(())
    }
}

/// Schedule record exchanged with the storage collaborator, keyed by card id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSchedule {
    pub id: CardId,
    #[serde(flatten)]
    pub state: ScheduleState,
}

impl CardSchedule {
    pub fn new(id: CardId, state: ScheduleState) -> Self {
        Self { id, state }
    }
}
