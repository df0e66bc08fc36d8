//! Error types for scheduling and review sessions.

use crate::models::CardId;
use thiserror::Error;

/// Rejections from the scheduler. The input state is never touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid rating {0}: must be 0 (Again), 1 (Hard), 2 (Good) or 3 (Easy)")]
    InvalidRating(u8),

    #[error("Invalid schedule state: {0}")]
    InvalidState(String),
}

/// Failure reported by the persistence collaborator.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write review record: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize review record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage rejected the update for card {card_id}: {reason}")]
    Rejected { card_id: CardId, reason: String },
}

/// Errors surfaced by a rating transition.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Card {got} is not the current card (expected {expected:?})")]
    CardNotInQueue {
        expected: Option<CardId>,
        got: CardId,
    },

    #[error("The session has already finished")]
    SessionFinished,

    /// The queue transition has already happened when this is returned.
    #[error("Review was applied but could not be persisted: {0}")]
    Persistence(#[source] PersistError),
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
