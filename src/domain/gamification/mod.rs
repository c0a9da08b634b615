//! Gamification context - level ladder and achievement unlocks.

mod achievement;
mod level;
mod overview;

pub use achievement::{
    default_achievements, Achievement, AchievementCriteria, StatField, UserAchievement,
};
pub use level::{current_level, default_levels, level_progress, next_level, Level};
pub use overview::{AchievementProgress, LevelSnapshot, ProgressionOverview};
