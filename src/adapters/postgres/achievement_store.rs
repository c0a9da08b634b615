//! PostgreSQL implementation of AchievementStore.
//!
//! Earned rows live in the database; the catalog itself is static and
//! served from process memory, mirroring the product's fixed
//! achievement list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{AchievementId, Timestamp, UserId};
use crate::domain::gamification::{default_achievements, Achievement, UserAchievement};
use crate::ports::{AchievementStore, StoreError};

/// PostgreSQL-backed earned achievements over a static catalog.
pub struct PostgresAchievementStore {
    pool: PgPool,
    catalog: Vec<Achievement>,
}

impl PostgresAchievementStore {
    /// Creates a store with the built-in catalog.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            catalog: default_achievements().to_vec(),
        }
    }
}

#[async_trait]
impl AchievementStore for PostgresAchievementStore {
    async fn catalog(&self) -> Result<Vec<Achievement>, StoreError> {
        Ok(self.catalog.clone())
    }

    async fn earned_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, StoreError> {
        let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT achievement_id, earned_at
            FROM user_achievements
            WHERE user_id = $1
            ORDER BY earned_at
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(achievement_id, earned_at)| {
                Ok(UserAchievement {
                    user_id: user_id.clone(),
                    achievement_id: AchievementId::new(achievement_id)
                        .map_err(|e| StoreError::Serialization(e.to_string()))?,
                    earned_at: Timestamp::from_datetime(earned_at),
                })
            })
            .collect()
    }

    async fn insert_if_absent(&self, earned: &UserAchievement) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id, earned_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(earned.user_id.as_str())
        .bind(earned.achievement_id.as_str())
        .bind(earned.earned_at.as_datetime())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
