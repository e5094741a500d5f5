mod error;
mod operations;
mod types;

pub use error::QueueError;
pub use operations::{
    estimate_wait_minutes, queue_number, queue_stats, size_factor, sort_by_check_in,
    validate_transition, BASE_WAIT_MINUTES, ENTRY_TTL_DAYS, MAX_WAIT_JITTER_MINUTES,
};
pub use types::{QueueEntry, QueueStats, QueueStatus};
