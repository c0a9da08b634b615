//! Recommendation handlers - generation cycles and feedback.

mod generate_recommendations;
mod record_feedback;
mod reset_dismissal;

pub use generate_recommendations::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, DEFAULT_RECOMMENDATION_LIMIT,
};
pub use record_feedback::{FeedbackAction, RecordFeedbackCommand, RecordFeedbackHandler};
pub use reset_dismissal::{ResetDismissalCommand, ResetDismissalHandler};
