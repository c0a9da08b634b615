//! ResetDismissal - administrative reset of a dismissed recommendation.
//!
//! Dismissal is terminal for normal cycles; this is the explicit
//! administrative path that returns a tool to the user's candidate
//! pool.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ToolId, UserId};
use crate::domain::recommendation::RecommendationEntry;
use crate::ports::RecommendationStore;

/// Command to reset one dismissal.
#[derive(Debug, Clone)]
pub struct ResetDismissalCommand {
    pub user_id: UserId,
    pub tool_id: ToolId,
}

/// Handler for the administrative dismissal reset.
pub struct ResetDismissalHandler {
    recommendations: Arc<dyn RecommendationStore>,
}

impl ResetDismissalHandler {
    pub fn new(recommendations: Arc<dyn RecommendationStore>) -> Self {
        Self { recommendations }
    }

    pub async fn handle(
        &self,
        cmd: ResetDismissalCommand,
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

        entry.reset_dismissal()?;
        self.recommendations.upsert(&entry).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            tool_id = %cmd.tool_id,
            "dismissal reset, tool returned to candidate pool"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRecommendationStore;
    use crate::domain::foundation::Score;
    use crate::domain::recommendation::RecommendationStatus;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn tool() -> ToolId {
        ToolId::new("notion-ai").unwrap()
    }

    async fn store_with(status_setup: impl FnOnce(&mut RecommendationEntry)) -> Arc<InMemoryRecommendationStore> {
        let store = Arc::new(InMemoryRecommendationStore::new());
        let mut entry = RecommendationEntry::active(
            user(),
            tool(),
            Score::from_raw(70),
            "Free to start".to_string(),
        );
        status_setup(&mut entry);
        store.upsert(&entry).await.unwrap();
        store
    }

    #[tokio::test]
    async fn reset_returns_dismissed_tool_to_pool() {
        let store = store_with(|e| e.dismiss().unwrap()).await;
        let handler = ResetDismissalHandler::new(store.clone());

        let entry = handler
            .handle(ResetDismissalCommand {
                user_id: user(),
                tool_id: tool(),
            })
            .await
            .unwrap();
        assert_eq!(entry.status, RecommendationStatus::Superseded);
        assert!(!entry.excludes_from_candidates());
    }

    #[tokio::test]
    async fn reset_rejects_non_dismissed_entries() {
        let store = store_with(|_| {}).await;
        let handler = ResetDismissalHandler::new(store);

        let result = handler
            .handle(ResetDismissalCommand {
                user_id: user(),
                tool_id: tool(),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn reset_unknown_tool_is_not_found() {
        let handler = ResetDismissalHandler::new(Arc::new(InMemoryRecommendationStore::new()));
        let result = handler
            .handle(ResetDismissalCommand {
                user_id: user(),
                tool_id: tool(),
            })
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::RecommendationNotFound);
    }
}
