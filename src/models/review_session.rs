//! Review session: the in-memory queue a study session walks through.
//!
//! The queue state is an explicit value, [`SessionState`], moved through
//! [`SessionState::apply`] on every rating. Again sends the current card to the tail of the
//! queue; any other rating moves the cursor past it. The session is finished once the
//! cursor runs off the end of the queue.

use super::{
    CardId, CardSchedule, CardTimer, Rating, ReviewEvent, ScheduleState, SessionSnapshot,
    scheduler,
};
use crate::config::{AutoRatePolicy, ReviewConfig, SchedulerConfig};
use crate::error::{Result, SessionError};
use crate::persistence::ReviewSink;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active { cursor: usize, queue: Vec<CardId> },
    Finished,
}

/// What a rating did to the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Again: the card moved to the tail, the cursor now points at the next card.
    Requeued,
    Advanced,
    Finished,
}

impl SessionState {
    pub fn start(queue: Vec<CardId>) -> Self {
        if queue.is_empty() {
            SessionState::Finished
        } else {
            SessionState::Active { cursor: 0, queue }
        }
    }

    pub fn current(&self) -> Option<CardId> {
        match self {
            SessionState::Active { cursor, queue } => queue.get(*cursor).copied(),
            SessionState::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Finished)
    }

    /// Applies a rating of the current card. `Finished` stays `Finished`, and so does an
    /// `Active` state whose cursor is already past the end of its queue.
    pub fn apply(self, rating: Rating) -> (SessionState, Transition) {
        let (mut cursor, mut queue) = match self {
            SessionState::Active { cursor, queue } => (cursor, queue),
            SessionState::Finished => return (SessionState::Finished, Transition::Finished),
        };

        if cursor >= queue.len() {
            return (SessionState::Finished, Transition::Finished);
        }

        let requeued = rating == Rating::Again;
        if requeued {
            let card = queue.remove(cursor);
            queue.push(card);
        } else {
            cursor += 1;
        }

        if cursor >= queue.len() {
            (SessionState::Finished, Transition::Finished)
        } else if requeued {
            (SessionState::Active { cursor, queue }, Transition::Requeued)
        } else {
            (SessionState::Active { cursor, queue }, Transition::Advanced)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RateOutcome {
    pub update: CardSchedule,
    pub event: ReviewEvent,
    pub transition: Transition,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContinueOutcome {
    /// First press: the answer is now shown.
    Revealed,
    /// Second press: the card was rated by the auto-rate policy.
    Rated(RateOutcome),
}

/// Counts for the end of a session, finished or aborted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub reviews: usize,
    pub requeues: usize,
    pub completed: Vec<CardId>,
    pub remaining: Vec<CardId>,
}

pub struct ReviewSession {
    state: SessionState,
    order: Vec<CardId>,
    schedules: HashMap<CardId, ScheduleState>,
    completed: Vec<CardId>,
    reviews: usize,
    requeues: usize,
    timer: Option<CardTimer>,
    scheduler: SchedulerConfig,
    auto_rate: AutoRatePolicy,
}

impl ReviewSession {
    /// Starts a session over a snapshot. The first card is presented at `now`.
    pub fn start(snapshot: SessionSnapshot, config: &ReviewConfig, now: DateTime<Utc>) -> Self {
        let order = snapshot.ids();
        let schedules = snapshot
            .cards
            .into_iter()
            .map(|card| (card.id, card.state))
            .collect();
        let state = SessionState::start(order.clone());
        let timer = state.current().map(|id| CardTimer::start(id, now));

        tracing::info!(cards = order.len(), "review session started");

        Self {
            state,
            order,
            schedules,
            completed: Vec::new(),
            reviews: 0,
            requeues: 0,
            timer,
            scheduler: config.scheduler.clone(),
            auto_rate: config.auto_rate.clone(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_card(&self) -> Option<CardId> {
        self.state.current()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_revealed(&self) -> bool {
        self.timer.as_ref().is_some_and(CardTimer::is_revealed)
    }

    /// Number of cards in the session.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 1-based position of the current card, `None` once finished.
    pub fn position(&self) -> Option<usize> {
        match &self.state {
            SessionState::Active { cursor, .. } => Some(cursor + 1),
            SessionState::Finished => None,
        }
    }

    /// Cards advanced past so far, in order.
    pub fn completed(&self) -> &[CardId] {
        &self.completed
    }

    /// In-session schedule of a card, including ratings already given.
    pub fn schedule_of(&self, card_id: CardId) -> Option<&ScheduleState> {
        self.schedules.get(&card_id)
    }

    /// All schedule records, in snapshot order.
    pub fn schedules(&self) -> Vec<CardSchedule> {
        self.order
            .iter()
            .filter_map(|id| {
                self.schedules
                    .get(id)
                    .map(|state| CardSchedule::new(*id, *state))
            })
            .collect()
    }

    /// Shows the answer of the current card. Returns the think time in milliseconds.
    pub fn reveal(&mut self, now: DateTime<Utc>) -> Result<Option<u64>> {
        let timer = self.timer.as_mut().ok_or(SessionError::SessionFinished)?;
        timer.reveal(now);
        Ok(timer.think_time_ms())
    }

    /// "Continue" without a rating: reveals first, then rates from the time since reveal.
    pub fn continue_action<S: ReviewSink + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        sink: &mut S,
    ) -> Result<ContinueOutcome> {
        let timer = self.timer.as_mut().ok_or(SessionError::SessionFinished)?;
        let Some(elapsed) = timer.since_reveal_ms(now) else {
            timer.reveal(now);
            return Ok(ContinueOutcome::Revealed);
        };
        let card_id = timer.card_id;
        let rating = self.auto_rate.choose(elapsed);
        tracing::debug!(card_id, elapsed_ms = elapsed, %rating, "auto-rated on continue");
        self.rate(card_id, rating, now, sink)
            .map(ContinueOutcome::Rated)
    }

    /// Rates with a raw quality value; anything outside 0..=3 is rejected untouched.
    pub fn rate_quality<S: ReviewSink + ?Sized>(
        &mut self,
        card_id: CardId,
        quality: u8,
        now: DateTime<Utc>,
        sink: &mut S,
    ) -> Result<RateOutcome> {
        if self.is_finished() {
            return Err(SessionError::SessionFinished);
        }
        let rating = Rating::try_from(quality)?;
        self.rate(card_id, rating, now, sink)
    }

    /// Rates the current card, moves the queue, then hands the result to `sink`.
    ///
    /// If the sink fails the queue has still moved and the in-session schedule is updated;
    /// the failure is returned as [`SessionError::Persistence`].
    pub fn rate<S: ReviewSink + ?Sized>(
        &mut self,
        card_id: CardId,
        rating: Rating,
        now: DateTime<Utc>,
        sink: &mut S,
    ) -> Result<RateOutcome> {
        let current = self.current_card().ok_or(SessionError::SessionFinished)?;
        if current != card_id {
            return Err(SessionError::CardNotInQueue {
                expected: Some(current),
                got: card_id,
            });
        }
        let prior = *self
            .schedules
            .get(&card_id)
            .ok_or(SessionError::CardNotInQueue {
                expected: None,
                got: card_id,
            })?;
        scheduler::check_state(&prior, &self.scheduler)?;

        let next = scheduler::schedule(&prior, rating, now, &self.scheduler);
        let timer = self
            .timer
            .as_ref()
            .filter(|timer| timer.card_id == card_id);
        let think_time_ms = timer.and_then(CardTimer::think_time_ms);
        let rating_time_ms = timer.and_then(|timer| timer.since_reveal_ms(now));
        let event = ReviewEvent::new(card_id, rating, &prior, &next, think_time_ms, now)
            .with_rating_time(rating_time_ms);

        self.schedules.insert(card_id, next);
        self.reviews += 1;

        let state = std::mem::replace(&mut self.state, SessionState::Finished);
        let (state, transition) = state.apply(rating);
        self.state = state;
        if rating == Rating::Again {
            self.requeues += 1;
        } else {
            self.completed.push(card_id);
        }
        self.timer = self.current_card().map(|id| CardTimer::start(id, now));

        if transition == Transition::Finished {
            tracing::info!(
                reviews = self.reviews,
                requeues = self.requeues,
                "review session finished"
            );
        }

        let outcome = RateOutcome {
            update: CardSchedule::new(card_id, next),
            event,
            transition,
        };

        if let Err(err) = sink.persist(&outcome.update, &outcome.event) {
            tracing::warn!(card_id, error = %err, "failed to persist review");
            return Err(SessionError::Persistence(err));
        }

        Ok(outcome)
    }

    pub fn summary(&self) -> SessionSummary {
        let remaining = match &self.state {
            SessionState::Active { cursor, queue } => queue[*cursor..].to_vec(),
            SessionState::Finished => Vec::new(),
        };
        SessionSummary {
            reviews: self.reviews,
            requeues: self.requeues,
            completed: self.completed.clone(),
            remaining,
        }
    }

    /// Ends the session early. Reviews already handed to the sink stay recorded.
    pub fn abort(self) -> SessionSummary {
        let summary = self.summary();
        tracing::info!(
            reviews = summary.reviews,
            remaining = summary.remaining.len(),
            "review session aborted"
        );
        summary
    }
}
