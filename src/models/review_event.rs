//! Record of a single rating, handed to the logging/statistics collaborator.
use super::{CardId, Rating, ScheduleState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub card_id: CardId,
    pub rating: Rating,
    pub prior_interval: f64,
    pub new_interval: f64,
    pub new_ease_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think_time_ms: Option<u64>,
    /// Time from reveal to rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_time_ms: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl ReviewEvent {
    pub fn new(
        card_id: CardId,
        rating: Rating,
        prior: &ScheduleState,
        next: &ScheduleState,
        think_time_ms: Option<u64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            card_id,
            rating,
            prior_interval: prior.interval,
            new_interval: next.interval,
            new_ease_factor: next.ease_factor,
            think_time_ms,
            rating_time_ms: None,
            timestamp,
        }
    }

    pub fn with_rating_time(mut self, rating_time_ms: Option<u64>) -> Self {
        self.rating_time_ms = rating_time_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_json_shape() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let prior = ScheduleState {
            interval: 10.0,
            ease_factor: 2.5,
            due_at: now,
        };
        let next = ScheduleState {
            interval: 1.0,
            ease_factor: 2.3,
            due_at: now,
        };
        let event = ReviewEvent::new(3, Rating::Again, &prior, &next, Some(1250), now)
            .with_rating_time(Some(640));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["card_id"], 3);
        assert_eq!(value["rating"], 0);
        assert_eq!(value["prior_interval"], 10.0);
        assert_eq!(value["new_interval"], 1.0);
        assert_eq!(value["think_time_ms"], 1250);
        assert_eq!(value["rating_time_ms"], 640);

        let without_time = ReviewEvent::new(3, Rating::Good, &prior, &next, None, now);
        let value = serde_json::to_value(&without_time).unwrap();
        assert!(value.get("think_time_ms").is_none());
        assert!(value.get("rating_time_ms").is_none());
    }
}
