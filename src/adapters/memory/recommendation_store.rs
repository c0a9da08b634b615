//! In-memory recommendation store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ToolId, UserId};
use crate::domain::recommendation::{RecommendationEntry, RecommendationStatus};
use crate::ports::{RecommendationStore, StoreError};

type Key = (UserId, ToolId);

/// In-memory store of recommendation entries keyed by (user, tool).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationStore {
    entries: Arc<RwLock<HashMap<Key, RecommendationEntry>>>,
}

impl InMemoryRecommendationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RecommendationEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<RecommendationEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(user_id.clone(), tool_id.clone())).cloned())
    }

    async fn upsert(&self, entry: &RecommendationEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert((entry.user_id.clone(), entry.tool_id.clone()), entry.clone());
        Ok(())
    }

    async fn replace_active_set(
        &self,
        user_id: &UserId,
        new_entries: &[RecommendationEntry],
    ) -> Result<(), StoreError> {
        // One write lock for the whole replacement keeps the cycle atomic
        // with respect to concurrent feedback on the same user.
        let mut entries = self.entries.write().await;

        let retained: Vec<ToolId> = new_entries.iter().map(|e| e.tool_id.clone()).collect();
        for entry in entries.values_mut() {
            if &entry.user_id == user_id
                && entry.status == RecommendationStatus::Active
                && !retained.contains(&entry.tool_id)
            {
                entry.supersede();
            }
        }

        for entry in new_entries {
            entries.insert((entry.user_id.clone(), entry.tool_id.clone()), entry.clone());
        }
        Ok(())
    }
}
