//! Achievement catalog, criteria interpreter, and earned rows.
//!
//! Criteria are a small tagged predicate type evaluated by a single
//! interpreter over `UserStats` fields - no ad hoc field-name matching.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, Percent, Timestamp, UserId};
use crate::domain::progression::UserStats;

/// A UserStats field that achievement criteria can threshold on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    ToolsImplemented,
    ModulesCompleted,
    GuidesCompleted,
    StreakDays,
    TimeInvestedMinutes,
    TotalPoints,
}

impl StatField {
    /// Reads the field's current value from stats.
    pub fn value_in(&self, stats: &UserStats) -> u64 {
        match self {
            Self::ToolsImplemented => u64::from(stats.tools_implemented),
            Self::ModulesCompleted => u64::from(stats.modules_completed),
            Self::GuidesCompleted => u64::from(stats.guides_completed),
            Self::StreakDays => u64::from(stats.streak_days),
            Self::TimeInvestedMinutes => stats.total_time_invested_minutes,
            Self::TotalPoints => stats.total_points,
        }
    }
}

/// Unlock predicate over UserStats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementCriteria {
    /// Field value reaches a threshold.
    Threshold { field: StatField, value: u64 },
}

impl AchievementCriteria {
    /// Evaluates the predicate against current stats.
    pub fn is_met(&self, stats: &UserStats) -> bool {
        match self {
            Self::Threshold { field, value } => field.value_in(stats) >= *value,
        }
    }

    /// Progress toward the unlock, capped at 100.
    pub fn progress(&self, stats: &UserStats) -> Percent {
        match self {
            Self::Threshold { field, value } => Percent::of_progress(field.value_in(stats), *value),
        }
    }
}

/// One entry in the static achievement catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub criteria: AchievementCriteria,
    /// Points awarded through the ledger when earned.
    pub reward_points: u32,
}

/// An earned achievement. Immutable once created; never revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub earned_at: Timestamp,
}

impl UserAchievement {
    /// Records an unlock at the current moment.
    pub fn earned_now(user_id: UserId, achievement_id: AchievementId) -> Self {
        Self {
            user_id,
            achievement_id,
            earned_at: Timestamp::now(),
        }
    }
}

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    field: StatField,
    value: u64,
    reward_points: u32,
) -> Achievement {
    Achievement {
        id: AchievementId::new(id).expect("static achievement id"),
        name: name.to_string(),
        description: description.to_string(),
        criteria: AchievementCriteria::Threshold { field, value },
        reward_points,
    }
}

/// Built-in achievement catalog.
pub static DEFAULT_ACHIEVEMENTS: Lazy<Vec<Achievement>> = Lazy::new(|| {
    vec![
        achievement(
            "first-tool",
            "First Steps",
            "Implement your first AI tool",
            StatField::ToolsImplemented,
            1,
            50,
        ),
        achievement(
            "tool-collector",
            "Tool Collector",
            "Implement five AI tools",
            StatField::ToolsImplemented,
            5,
            150,
        ),
        achievement(
            "quick-study",
            "Quick Study",
            "Complete three learning modules",
            StatField::ModulesCompleted,
            3,
            75,
        ),
        achievement(
            "by-the-book",
            "By the Book",
            "Complete three setup guides",
            StatField::GuidesCompleted,
            3,
            75,
        ),
        achievement(
            "week-warrior",
            "Week Warrior",
            "Stay active seven days in a row",
            StatField::StreakDays,
            7,
            100,
        ),
        achievement(
            "deep-diver",
            "Deep Diver",
            "Invest ten hours learning AI tools",
            StatField::TimeInvestedMinutes,
            600,
            100,
        ),
        achievement(
            "rising-star",
            "Rising Star",
            "Reach 500 total points",
            StatField::TotalPoints,
            500,
            25,
        ),
    ]
});

/// Returns the built-in achievement catalog.
pub fn default_achievements() -> &'static [Achievement] {
    &DEFAULT_ACHIEVEMENTS
}
