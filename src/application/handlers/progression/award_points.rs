//! AwardPoints - explicit point awards, separate from activity counting.
//!
//! Keeping the point economy out of the activity counters lets product
//! tune it independently. Every award is logged with its reason.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::gamification::Achievement;
use crate::domain::progression::{StatsDelta, UserStats};
use crate::ports::StatsStore;

use super::EvaluateAchievementsHandler;

/// Command to award (or deduct) points.
#[derive(Debug, Clone)]
pub struct AwardPointsCommand {
    pub user_id: UserId,
    /// Signed; deductions floor the balance at zero.
    pub amount: i64,
    /// Audit reason, required.
    pub reason: String,
}

/// Result of a point award.
#[derive(Debug, Clone)]
pub struct AwardPointsResult {
    pub stats: UserStats,
    pub newly_earned: Vec<Achievement>,
}

/// Handler for the explicit point economy.
pub struct AwardPointsHandler {
    stats_store: Arc<dyn StatsStore>,
    achievements: Arc<EvaluateAchievementsHandler>,
}

impl AwardPointsHandler {
    pub fn new(
        stats_store: Arc<dyn StatsStore>,
        achievements: Arc<EvaluateAchievementsHandler>,
    ) -> Self {
        Self {
            stats_store,
            achievements,
        }
    }

    pub async fn handle(&self, cmd: AwardPointsCommand) -> Result<AwardPointsResult, DomainError> {
        if cmd.reason.trim().is_empty() {
            return Err(ValidationError::empty_field("reason").into());
        }

        let stats = self
            .stats_store
            .apply(&cmd.user_id, &StatsDelta::points(cmd.amount), None)
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            amount = cmd.amount,
            reason = %cmd.reason,
            total_points = stats.total_points,
            "points awarded"
        );

        let newly_earned = self.achievements.evaluate(&cmd.user_id, &stats).await?;
        let stats = if newly_earned.is_empty() {
            stats
        } else {
            self.stats_store
                .find(&cmd.user_id)
                .await?
                .unwrap_or(stats)
        };

        Ok(AwardPointsResult {
            stats,
            newly_earned,
        })
    }
}
