pub mod auto_rate;
pub mod card_timer;
pub mod rating;
pub mod review_event;
pub mod review_session;
pub mod schedule_state;
pub mod scheduler;
pub mod snapshot;

pub use card_timer::CardTimer;
pub use rating::Rating;
pub use review_event::ReviewEvent;
pub use review_session::{
    ContinueOutcome, RateOutcome, ReviewSession, SessionState, SessionSummary, Transition,
};
pub use schedule_state::{CardId, CardSchedule, ScheduleState};
pub use snapshot::{DeckSummary, SessionSnapshot, SnapshotMode, seeded_rng};
