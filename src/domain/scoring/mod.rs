//! Scoring engine - pure relevance scoring for candidate tools.

mod engine;

pub use engine::{score, ActivitySummary, ScoredTool};
