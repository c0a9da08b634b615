//! Progression handlers - the ledger side of the engine.

mod award_points;
mod evaluate_achievements;
mod get_progression;
mod record_activity;

pub use award_points::{AwardPointsCommand, AwardPointsHandler, AwardPointsResult};
pub use evaluate_achievements::EvaluateAchievementsHandler;
pub use get_progression::{GetProgressionHandler, GetProgressionQuery};
pub use record_activity::{RecordActivityCommand, RecordActivityHandler, RecordActivityResult};
