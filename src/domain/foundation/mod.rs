//! Foundation value objects shared across bounded contexts.

mod errors;
mod ids;
mod percent;
mod score;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AchievementId, EventId, ToolId, UserId};
pub use percent::Percent;
pub use score::Score;
pub use timestamp::Timestamp;
