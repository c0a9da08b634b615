//! GetProgression - query handler for the progression dashboard panel.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Percent, UserId};
use crate::domain::gamification::{
    current_level, level_progress, next_level, AchievementProgress, LevelSnapshot,
    ProgressionOverview,
};
use crate::domain::progression::UserStats;
use crate::ports::{AchievementStore, LevelCatalog, StatsStore};

/// Query for a user's progression overview.
#[derive(Debug, Clone)]
pub struct GetProgressionQuery {
    pub user_id: UserId,
}

/// Handler aggregating stats, level, and achievement standing.
///
/// A user with no recorded activity gets zeroed stats and the first
/// rung of the ladder rather than an error.
pub struct GetProgressionHandler {
    stats_store: Arc<dyn StatsStore>,
    achievement_store: Arc<dyn AchievementStore>,
    level_catalog: Arc<dyn LevelCatalog>,
}

impl GetProgressionHandler {
    pub fn new(
        stats_store: Arc<dyn StatsStore>,
        achievement_store: Arc<dyn AchievementStore>,
        level_catalog: Arc<dyn LevelCatalog>,
    ) -> Self {
        Self {
            stats_store,
            achievement_store,
            level_catalog,
        }
    }

    pub async fn handle(
        &self,
        query: GetProgressionQuery,
    ) -> Result<ProgressionOverview, DomainError> {
        let stats = self
            .stats_store
            .find(&query.user_id)
            .await?
            .unwrap_or_else(|| UserStats::new(query.user_id.clone()));

        let levels = self.level_catalog.levels().await?;
        if levels.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Level catalog is empty",
            ));
        }
        let level = LevelSnapshot {
            current: current_level(&levels, stats.total_points).clone(),
            next: next_level(&levels, stats.total_points).cloned(),
            progress: level_progress(&levels, stats.total_points),
        };

        let earned: HashMap<_, _> = self
            .achievement_store
            .earned_for_user(&query.user_id)
            .await?
            .into_iter()
            .map(|ua| (ua.achievement_id.clone(), ua.earned_at))
            .collect();

        let achievements = self
            .achievement_store
            .catalog()
            .await?
            .into_iter()
            .map(|achievement| {
                let earned_at = earned.get(&achievement.id).copied();
                let progress = if earned_at.is_some() {
                    Percent::HUNDRED
                } else {
                    achievement.criteria.progress(&stats)
                };
                AchievementProgress {
                    achievement,
                    earned_at,
                    progress,
                }
            })
            .collect();

        Ok(ProgressionOverview {
            stats,
            level,
            achievements,
        })
    }
}
