//! Progression context - derived user stats over the activity log.

mod stats;

pub use stats::{StatsDelta, UserStats};
