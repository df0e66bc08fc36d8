//! Spaced repetition scheduler.
//!
//! Maps (current schedule state, rating, now) to the next schedule state:
//! - Again/Hard: interval resets to 1 day, ease factor drops (more for Again), and the card
//!   comes back after a short delay measured in minutes, sooner for Again
//! - Good/Easy on a card with interval <= 1: interval jumps to a fixed graduation value
//! - Good/Easy otherwise: interval grows by the ease factor, and always by at least one day
//! - Only Easy raises the ease factor; it never drops below the configured minimum (1.3)
//! - A successful review is never due again at or before `now`

use super::{Rating, ScheduleState};
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use chrono::{DateTime, Duration, Utc};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Computes the next schedule state. Pure: `state` is only read.
///
/// An input ease factor below `min_ease_factor` is raised to it on any rating, Good included.
/// Intervals never exceed `max_interval_days`, so a card already at the cap stays there.
/// Due dates saturate at the latest representable time instead of overflowing.
pub fn schedule(
    state: &ScheduleState,
    rating: Rating,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> ScheduleState {
    let (interval, ease_factor, mut due_at) = if rating.is_failing() {
        let ease = (state.ease_factor - config.ease_penalty(rating)).max(config.min_ease_factor);
        (1.0, ease, offset(now, config.short_delay(rating)))
    } else {
        let interval = if state.interval <= 1.0 {
            config.graduation_days(rating)
        } else {
            // Grow with the ease factor the card had before this review
            (state.interval * state.ease_factor)
                .round()
                .max(state.interval + 1.0)
        };
        let interval = interval.min(config.max_interval_days);
        let bonus = if rating == Rating::Easy {
            config.easy_bonus
        } else {
            0.0
        };
        let ease = (state.ease_factor + bonus).max(config.min_ease_factor);
        (interval, ease, offset(now, days(interval)))
    };

    if rating.is_successful() && due_at <= now {
        due_at = offset(now, config.success_clamp());
    }

    tracing::debug!(
        %rating,
        prior_interval = state.interval,
        interval,
        ease_factor,
        %due_at,
        "scheduled review"
    );

    ScheduleState {
        interval,
        ease_factor,
        due_at,
    }
}

/// Rejects states the scheduler cannot work with: malformed numbers, or an interval
/// beyond the configured maximum.
pub fn check_state(state: &ScheduleState, config: &SchedulerConfig) -> Result<(), ScheduleError> {
    state.validate()?;
    if state.interval > config.max_interval_days {
        return Err(ScheduleError::InvalidState(format!(
            "interval {} exceeds the maximum of {} days",
            state.interval, config.max_interval_days
        )));
    }
    Ok(())
}

/// Like [`schedule`], for a raw quality value coming from outside the core.
/// Out-of-range qualities and unusable states are rejected before anything is computed.
pub fn schedule_quality(
    state: &ScheduleState,
    quality: u8,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<ScheduleState, ScheduleError> {
    let rating = Rating::try_from(quality)?;
    check_state(state, config)?;
    Ok(schedule(state, rating, now, config))
}

fn days(interval: f64) -> Duration {
    let millis = (interval * MILLIS_PER_DAY).round();
    if millis >= i64::MAX as f64 {
        return Duration::MAX;
    }
    Duration::try_milliseconds(millis as i64).unwrap_or(Duration::MAX)
}

fn offset(now: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    now.checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
