//! Presentation timing for the card currently on screen.
use super::CardId;
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct CardTimer {
    pub card_id: CardId,
    pub presented_at: DateTime<Utc>,
    pub revealed_at: Option<DateTime<Utc>>,
}

impl CardTimer {
    pub fn start(card_id: CardId, now: DateTime<Utc>) -> Self {
        Self {
            card_id,
            presented_at: now,
            revealed_at: None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Records the reveal time. Only the first reveal counts.
    pub fn reveal(&mut self, now: DateTime<Utc>) {
        if self.revealed_at.is_none() {
            self.revealed_at = Some(now);
        }
    }

    /// Think time: from presentation to reveal.
    pub fn think_time_ms(&self) -> Option<u64> {
        self.revealed_at
            .map(|revealed| elapsed_ms(self.presented_at, revealed))
    }

    pub fn since_reveal_ms(&self, now: DateTime<Utc>) -> Option<u64> {
        self.revealed_at.map(|revealed| elapsed_ms(revealed, now))
    }
}

fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_think_time_from_reveal() {
        let mut timer = CardTimer::start(1, t0());
        assert_eq!(timer.think_time_ms(), None);
        assert!(!timer.is_revealed());

        timer.reveal(t0() + Duration::milliseconds(2300));
        assert_eq!(timer.think_time_ms(), Some(2300));
    }

    #[test]
    fn test_second_reveal_ignored() {
        let mut timer = CardTimer::start(1, t0());
        timer.reveal(t0() + Duration::seconds(1));
        timer.reveal(t0() + Duration::seconds(9));
        assert_eq!(timer.think_time_ms(), Some(1000));
        assert_eq!(
            timer.since_reveal_ms(t0() + Duration::seconds(3)),
            Some(2000)
        );
    }

    #[test]
    fn test_clock_going_backwards_clamps_to_zero() {
        let mut timer = CardTimer::start(1, t0());
        timer.reveal(t0() - Duration::seconds(5));
        assert_eq!(timer.think_time_ms(), Some(0));
    }
}
