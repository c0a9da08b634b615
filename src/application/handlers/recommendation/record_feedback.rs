//! RecordFeedback - user feedback on a recommended tool.
//!
//! The `implementing` action is the one place the recommendation and
//! progression subsystems interact: it routes an `implemented` activity
//! event through the ledger, which increments `tools_implemented`
//! idempotently per (user, tool).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::handlers::progression::{RecordActivityCommand, RecordActivityHandler};
use crate::domain::activity::ActivityKind;
use crate::domain::foundation::{DomainError, ErrorCode, ToolId, UserId};
use crate::domain::recommendation::RecommendationEntry;
use crate::ports::RecommendationStore;

/// What the user said about a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackAction {
    /// Opened the detail view; status unchanged.
    Interested,
    /// Declined; terminal for this (user, tool) pair.
    Dismissed,
    /// Adopted the tool.
    Implementing,
}

/// Command carrying one feedback action.
#[derive(Debug, Clone)]
pub struct RecordFeedbackCommand {
    pub user_id: UserId,
    pub tool_id: ToolId,
    pub action: FeedbackAction,
}

/// Handler reconciling recommendation entries with user feedback.
pub struct RecordFeedbackHandler {
    recommendations: Arc<dyn RecommendationStore>,
    activity: Arc<RecordActivityHandler>,
}

impl RecordFeedbackHandler {
    pub fn new(
        recommendations: Arc<dyn RecommendationStore>,
        activity: Arc<RecordActivityHandler>,
    ) -> Self {
        Self {
            recommendations,
            activity,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordFeedbackCommand,
    ) -> Result<RecommendationEntry, DomainError> {
        let mut entry = self
            .recommendations
            .find(&cmd.user_id, &cmd.tool_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::RecommendationNotFound,
                    "No recommendation for this tool",
                )
                .with_detail("tool_id", cmd.tool_id.to_string())
            })?;

        let activity_kind = match cmd.action {
            FeedbackAction::Interested => ActivityKind::Viewed {
                tool_id: cmd.tool_id.clone(),
            },
            FeedbackAction::Dismissed => {
                entry.dismiss()?;
                self.recommendations.upsert(&entry).await?;
                ActivityKind::Dismissed {
                    tool_id: cmd.tool_id.clone(),
                }
            }
            FeedbackAction::Implementing => {
                entry.implement()?;
                self.recommendations.upsert(&entry).await?;
                ActivityKind::Implemented {
                    tool_id: cmd.tool_id.clone(),
                }
            }
        };

        self.activity
            .handle(RecordActivityCommand {
                user_id: cmd.user_id,
                kind: activity_kind,
                occurred_at: None,
            })
            .await?;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAchievementStore, InMemoryActivityLog, InMemoryRecommendationStore,
        InMemoryStatsStore,
    };
    use crate::application::handlers::progression::EvaluateAchievementsHandler;
    use crate::domain::foundation::Score;
    use crate::domain::recommendation::RecommendationStatus;
    use crate::ports::StatsStore as _;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn tool() -> ToolId {
        ToolId::new("notion-ai").unwrap()
    }

    struct Fixture {
        handler: RecordFeedbackHandler,
        recommendations: Arc<InMemoryRecommendationStore>,
        stats: Arc<InMemoryStatsStore>,
    }

    async fn fixture_with_active_entry() -> Fixture {
        let recommendations = Arc::new(InMemoryRecommendationStore::new());
        let stats = Arc::new(InMemoryStatsStore::new());
        let achievements = Arc::new(InMemoryAchievementStore::new());
        let evaluator = Arc::new(EvaluateAchievementsHandler::new(
            stats.clone(),
            achievements,
        ));
        let activity = Arc::new(RecordActivityHandler::new(
            Arc::new(InMemoryActivityLog::new()),
            stats.clone(),
            evaluator,
        ));

        let entry = RecommendationEntry::active(
            user(),
            tool(),
            Score::from_raw(85),
            "Simple setup process".to_string(),
        );
        recommendations.upsert(&entry).await.unwrap();

        Fixture {
            handler: RecordFeedbackHandler::new(recommendations.clone(), activity),
            recommendations,
            stats,
        }
    }

    fn feedback(action: FeedbackAction) -> RecordFeedbackCommand {
        RecordFeedbackCommand {
            user_id: user(),
            tool_id: tool(),
            action,
        }
    }

    #[tokio::test]
    async fn dismissed_transitions_entry_to_dismissed() {
        let f = fixture_with_active_entry().await;
        let entry = f.handler.handle(feedback(FeedbackAction::Dismissed)).await.unwrap();
        assert_eq!(entry.status, RecommendationStatus::Dismissed);

        let stored = f.recommendations.find(&user(), &tool()).await.unwrap().unwrap();
        assert_eq!(stored.status, RecommendationStatus::Dismissed);
    }

    #[tokio::test]
    async fn implementing_marks_entry_and_increments_stats() {
        let f = fixture_with_active_entry().await;
        let entry = f
            .handler
            .handle(feedback(FeedbackAction::Implementing))
            .await
            .unwrap();
        assert_eq!(entry.status, RecommendationStatus::Implemented);

        let stats = f.stats.find(&user()).await.unwrap().unwrap();
        assert_eq!(stats.tools_implemented, 1);
    }

    #[tokio::test]
    async fn implementing_twice_counts_once() {
        let f = fixture_with_active_entry().await;
        f.handler
            .handle(feedback(FeedbackAction::Implementing))
            .await
            .unwrap();
        f.handler
            .handle(feedback(FeedbackAction::Implementing))
            .await
            .unwrap();

        let stats = f.stats.find(&user()).await.unwrap().unwrap();
        assert_eq!(stats.tools_implemented, 1);
    }

    #[tokio::test]
    async fn dismissing_an_implemented_entry_is_rejected() {
        let f = fixture_with_active_entry().await;
        f.handler
            .handle(feedback(FeedbackAction::Implementing))
            .await
            .unwrap();

        let result = f.handler.handle(feedback(FeedbackAction::Dismissed)).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidTransition);

        let stored = f.recommendations.find(&user(), &tool()).await.unwrap().unwrap();
        assert_eq!(stored.status, RecommendationStatus::Implemented);
    }

    #[tokio::test]
    async fn interested_leaves_status_unchanged() {
        let f = fixture_with_active_entry().await;
        let entry = f
            .handler
            .handle(feedback(FeedbackAction::Interested))
            .await
            .unwrap();
        assert_eq!(entry.status, RecommendationStatus::Active);
    }

    #[tokio::test]
    async fn feedback_for_unknown_tool_is_not_found() {
        let f = fixture_with_active_entry().await;
        let result = f
            .handler
            .handle(RecordFeedbackCommand {
                user_id: user(),
                tool_id: ToolId::new("unknown-tool").unwrap(),
                action: FeedbackAction::Dismissed,
            })
            .await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::RecommendationNotFound);
    }
}
