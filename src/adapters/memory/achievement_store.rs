//! In-memory achievement store.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::gamification::{default_achievements, Achievement, UserAchievement};
use crate::ports::{AchievementStore, StoreError};

/// In-memory achievement catalog plus earned rows.
#[derive(Debug, Clone)]
pub struct InMemoryAchievementStore {
    catalog: Arc<Vec<Achievement>>,
    earned: Arc<RwLock<HashMap<(UserId, AchievementId), UserAchievement>>>,
}

impl InMemoryAchievementStore {
    /// Creates a store with the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(default_achievements().to_vec())
    }

    /// Creates a store with a custom catalog (tests).
    pub fn with_catalog(catalog: Vec<Achievement>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            earned: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAchievementStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AchievementStore for InMemoryAchievementStore {
    async fn catalog(&self) -> Result<Vec<Achievement>, StoreError> {
        Ok(self.catalog.as_ref().clone())
    }

    async fn earned_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, StoreError> {
        let earned = self.earned.read().await;
        Ok(earned
            .values()
            .filter(|ua| &ua.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_if_absent(&self, row: &UserAchievement) -> Result<bool, StoreError> {
        let mut earned = self.earned.write().await;
        let key = (row.user_id.clone(), row.achievement_id.clone());
        match earned.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(row.clone());
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_if_absent_is_unique_per_user_and_achievement() {
        let store = InMemoryAchievementStore::new();
        let row = UserAchievement::earned_now(
            UserId::new("u1").unwrap(),
            AchievementId::new("first-tool").unwrap(),
        );

        assert!(store.insert_if_absent(&row).await.unwrap());
        assert!(!store.insert_if_absent(&row).await.unwrap());

        let earned = store
            .earned_for_user(&UserId::new("u1").unwrap())
            .await
            .unwrap();
        assert_eq!(earned.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_preserves_original_earn_timestamp() {
        let store = InMemoryAchievementStore::new();
        let user = UserId::new("u1").unwrap();
        let id = AchievementId::new("first-tool").unwrap();

        let first = UserAchievement::earned_now(user.clone(), id.clone());
        store.insert_if_absent(&first).await.unwrap();
        let replay = UserAchievement::earned_now(user.clone(), id);
        store.insert_if_absent(&replay).await.unwrap();

        let earned = store.earned_for_user(&user).await.unwrap();
        assert_eq!(earned[0].earned_at, first.earned_at);
    }
}
