//! In-memory activity log.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::activity::ActivityEvent;
use crate::domain::foundation::UserId;
use crate::ports::{ActivityLog, StoreError};

#[derive(Debug, Default)]
struct LogState {
    events: Vec<ActivityEvent>,
    seen_keys: HashSet<(UserId, String)>,
}

/// In-memory append-only activity log with keyed dedup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    state: Arc<RwLock<LogState>>,
}

impl InMemoryActivityLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded events.
    pub async fn len(&self) -> usize {
        self.state.read().await.events.len()
    }

    /// Whether the log is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.events.is_empty()
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn append(&self, event: &ActivityEvent) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.events.push(event.clone());
        Ok(())
    }

    async fn insert_keyed(
        &self,
        event: &ActivityEvent,
        dedup_key: &str,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let key = (event.user_id.clone(), dedup_key.to_string());
        if !state.seen_keys.insert(key) {
            return Ok(false);
        }
        state.events.push(event.clone());
        Ok(true)
    }

    async fn events_for_user(&self, user_id: &UserId) -> Result<Vec<ActivityEvent>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }
}
