//! Recommendation context - per-(user, tool) recommendation entries.

mod entry;

pub use entry::{Priority, RecommendationEntry, RecommendationStatus};
