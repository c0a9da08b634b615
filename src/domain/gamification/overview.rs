//! Progression overview - the aggregated read model the dashboard shows.

use serde::Serialize;

use crate::domain::foundation::{Percent, Timestamp};
use crate::domain::progression::UserStats;

use super::{Achievement, Level};

/// Current and next rung plus progress between them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    pub current: Level,
    /// None once the top of the ladder is reached.
    pub next: Option<Level>,
    pub progress: Percent,
}

/// One achievement with the user's standing against it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub earned_at: Option<Timestamp>,
    pub progress: Percent,
}

impl AchievementProgress {
    /// Whether the achievement is already unlocked.
    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}

/// Everything the progression panel renders in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionOverview {
    pub stats: UserStats,
    pub level: LevelSnapshot,
    pub achievements: Vec<AchievementProgress>,
}
