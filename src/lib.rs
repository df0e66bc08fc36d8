pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod persistence;

pub use config::{AutoRatePolicy, ReviewConfig, SchedulerConfig};
pub use error::{PersistError, ScheduleError, SessionError};
pub use models::{
    CardSchedule, Rating, ReviewEvent, ReviewSession, ScheduleState, SessionSnapshot,
    SessionState,
};
pub use persistence::ReviewSink;
