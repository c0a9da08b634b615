//! RecommendationStore port for per-(user, tool) recommendation entries.

use async_trait::async_trait;

use crate::domain::foundation::{ToolId, UserId};
use crate::domain::recommendation::RecommendationEntry;

use super::StoreError;

/// Persistence for recommendation entries, keyed by (user, tool).
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// All entries for a user, any status.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RecommendationEntry>, StoreError>;

    /// Looks up the entry for a (user, tool) pair.
    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<RecommendationEntry>, StoreError>;

    /// Inserts or replaces the entry for its (user, tool) key.
    async fn upsert(&self, entry: &RecommendationEntry) -> Result<(), StoreError>;

    /// Replaces the user's active set in one operation: existing active
    /// entries not present in `entries` become superseded, and each
    /// given entry is upserted as active. Dismissed and implemented
    /// entries are never touched.
    async fn replace_active_set(
        &self,
        user_id: &UserId,
        entries: &[RecommendationEntry],
    ) -> Result<(), StoreError>;
}
