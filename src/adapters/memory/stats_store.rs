//! In-memory stats store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::progression::{StatsDelta, UserStats};
use crate::ports::{StatsStore, StoreError};

/// In-memory store of user stats.
///
/// The write lock spans the whole read-modify-write in `apply`, so
/// increments are atomic relative to the stored value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsStore {
    stats: Arc<RwLock<HashMap<UserId, UserStats>>>,
}

impl InMemoryStatsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, StoreError> {
        let stats = self.stats.read().await;
        Ok(stats.get(user_id).cloned())
    }

    async fn apply(
        &self,
        user_id: &UserId,
        delta: &StatsDelta,
        activity_day: Option<NaiveDate>,
    ) -> Result<UserStats, StoreError> {
        let mut stats = self.stats.write().await;
        let entry = stats
            .entry(user_id.clone())
            .or_insert_with(|| UserStats::new(user_id.clone()));
        if let Some(day) = activity_day {
            entry.record_activity_day(day);
        }
        entry.apply_delta(delta);
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn apply_creates_row_lazily() {
        let store = InMemoryStatsStore::new();
        assert!(store.find(&user()).await.unwrap().is_none());

        let stats = store
            .apply(&user(), &StatsDelta::points(10), None)
            .await
            .unwrap();
        assert_eq!(stats.total_points, 10);
        assert!(store.find(&user()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_applies_both_land() {
        let store = InMemoryStatsStore::new();
        let uid = user();
        let delta_a = StatsDelta::points(10);
        let delta_b = StatsDelta::points(15);
        let (a, b) = tokio::join!(
            store.apply(&uid, &delta_a, None),
            store.apply(&uid, &delta_b, None),
        );
        a.unwrap();
        b.unwrap();
        assert_eq!(store.find(&user()).await.unwrap().unwrap().total_points, 25);
    }

    #[tokio::test]
    async fn activity_day_runs_streak_rule_atomically() {
        let store = InMemoryStatsStore::new();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let stats = store
            .apply(&user(), &StatsDelta::default(), Some(day))
            .await
            .unwrap();
        assert_eq!(stats.streak_days, 1);
        assert_eq!(stats.last_activity_date, Some(day));
    }
}
