//! EvaluateAchievements - unlock evaluation after a stats mutation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{AchievementId, DomainError, UserId};
use crate::domain::gamification::{Achievement, UserAchievement};
use crate::domain::progression::{StatsDelta, UserStats};
use crate::ports::{AchievementStore, StatsStore};

/// Evaluates unlock criteria and records newly earned achievements.
///
/// Uniqueness is enforced by the store's insert-if-absent key, so a
/// concurrent or replayed evaluation of an already-earned achievement
/// is a no-op. Reward points are awarded through the ledger in the
/// same pass; an unlock caused by those reward points lands on the
/// next evaluation rather than recursing.
pub struct EvaluateAchievementsHandler {
    stats_store: Arc<dyn StatsStore>,
    achievement_store: Arc<dyn AchievementStore>,
}

impl EvaluateAchievementsHandler {
    pub fn new(
        stats_store: Arc<dyn StatsStore>,
        achievement_store: Arc<dyn AchievementStore>,
    ) -> Self {
        Self {
            stats_store,
            achievement_store,
        }
    }

    /// Runs one evaluation pass against the given stats snapshot.
    /// Returns the achievements earned in this pass.
    pub async fn evaluate(
        &self,
        user_id: &UserId,
        stats: &UserStats,
    ) -> Result<Vec<Achievement>, DomainError> {
        let catalog = self.achievement_store.catalog().await?;
        let earned: HashSet<AchievementId> = self
            .achievement_store
            .earned_for_user(user_id)
            .await?
            .into_iter()
            .map(|ua| ua.achievement_id)
            .collect();

        let mut newly_earned = Vec::new();
        for achievement in catalog {
            if earned.contains(&achievement.id) || !achievement.criteria.is_met(stats) {
                continue;
            }

            let row = UserAchievement::earned_now(user_id.clone(), achievement.id.clone());
            if !self.achievement_store.insert_if_absent(&row).await? {
                // Another writer earned it first.
                continue;
            }

            tracing::info!(
                user_id = %user_id,
                achievement = %achievement.id,
                points = achievement.reward_points,
                "achievement earned"
            );
            self.stats_store
                .apply(
                    user_id,
                    &StatsDelta::achievement(achievement.reward_points),
                    None,
                )
                .await?;
            newly_earned.push(achievement);
        }
        Ok(newly_earned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAchievementStore, InMemoryStatsStore};
    use crate::ports::StatsStore as _;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn handler() -> (
        EvaluateAchievementsHandler,
        Arc<InMemoryStatsStore>,
        Arc<InMemoryAchievementStore>,
    ) {
        let stats = Arc::new(InMemoryStatsStore::new());
        let achievements = Arc::new(InMemoryAchievementStore::new());
        let handler = EvaluateAchievementsHandler::new(stats.clone(), achievements.clone());
        (handler, stats, achievements)
    }

    #[tokio::test]
    async fn unmet_criteria_earn_nothing() {
        let (handler, _, _) = handler();
        let stats = UserStats::new(user());
        let earned = handler.evaluate(&user(), &stats).await.unwrap();
        assert!(earned.is_empty());
    }

    #[tokio::test]
    async fn met_criteria_earn_exactly_once() {
        let (handler, _, achievement_store) = handler();
        let mut stats = UserStats::new(user());
        stats.tools_implemented = 1;

        let first = handler.evaluate(&user(), &stats).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id.as_str(), "first-tool");

        // Re-evaluating the same snapshot is a no-op.
        let second = handler.evaluate(&user(), &stats).await.unwrap();
        assert!(second.is_empty());

        let rows = achievement_store.earned_for_user(&user()).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn reward_points_flow_through_the_ledger() {
        let (handler, stats_store, _) = handler();
        let mut stats = UserStats::new(user());
        stats.tools_implemented = 1;

        handler.evaluate(&user(), &stats).await.unwrap();

        let stored = stats_store.find(&user()).await.unwrap().unwrap();
        assert_eq!(stored.total_points, 50);
        assert_eq!(stored.achievements_earned, 1);
    }

    #[tokio::test]
    async fn multiple_thresholds_can_unlock_in_one_pass() {
        let (handler, _, _) = handler();
        let mut stats = UserStats::new(user());
        stats.tools_implemented = 5;
        stats.streak_days = 7;

        let earned = handler.evaluate(&user(), &stats).await.unwrap();
        let ids: Vec<&str> = earned.iter().map(|a| a.id.as_str()).collect();
        assert!(ids.contains(&"first-tool"));
        assert!(ids.contains(&"tool-collector"));
        assert!(ids.contains(&"week-warrior"));
    }
}
