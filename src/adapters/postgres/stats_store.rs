//! PostgreSQL implementation of StatsStore.
//!
//! The whole apply runs as one upsert statement: counter increments and
//! the streak rule are evaluated by the database against the stored
//! row, never against a value read earlier by this process.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::foundation::UserId;
use crate::domain::progression::{StatsDelta, UserStats};
use crate::ports::{StatsStore, StoreError};

/// PostgreSQL-backed user stats.
pub struct PostgresStatsStore {
    pool: PgPool,
}

impl PostgresStatsStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type StatsRow = (i64, i32, i32, i32, i32, i32, i64, Option<NaiveDate>);

fn row_to_stats(user_id: &UserId, row: StatsRow) -> Result<UserStats, StoreError> {
    let (
        total_points,
        streak_days,
        tools_implemented,
        modules_completed,
        guides_completed,
        achievements_earned,
        total_time_invested_minutes,
        last_activity_date,
    ) = row;

    let counter = |value: i32, field: &str| {
        u32::try_from(value)
            .map_err(|_| StoreError::Serialization(format!("negative {field} counter")))
    };

    Ok(UserStats {
        user_id: user_id.clone(),
        total_points: u64::try_from(total_points)
            .map_err(|_| StoreError::Serialization("negative total_points".to_string()))?,
        streak_days: counter(streak_days, "streak_days")?,
        tools_implemented: counter(tools_implemented, "tools_implemented")?,
        modules_completed: counter(modules_completed, "modules_completed")?,
        guides_completed: counter(guides_completed, "guides_completed")?,
        achievements_earned: counter(achievements_earned, "achievements_earned")?,
        total_time_invested_minutes: u64::try_from(total_time_invested_minutes)
            .map_err(|_| StoreError::Serialization("negative time counter".to_string()))?,
        last_activity_date,
    })
}

#[async_trait]
impl StatsStore for PostgresStatsStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, StoreError> {
        let row: Option<StatsRow> = sqlx::query_as(
            r#"
            SELECT total_points, streak_days, tools_implemented, modules_completed,
                   guides_completed, achievements_earned, total_time_invested_minutes,
                   last_activity_date
            FROM user_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_stats(user_id, r)).transpose()
    }

    async fn apply(
        &self,
        user_id: &UserId,
        delta: &StatsDelta,
        activity_day: Option<NaiveDate>,
    ) -> Result<UserStats, StoreError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            INSERT INTO user_stats (
                user_id, total_points, streak_days, tools_implemented,
                modules_completed, guides_completed, achievements_earned,
                total_time_invested_minutes, last_activity_date
            )
            VALUES (
                $1, GREATEST($2, 0),
                CASE WHEN $8::date IS NULL THEN 0 ELSE 1 END,
                $3, $4, $5, $6, $7, $8
            )
            ON CONFLICT (user_id) DO UPDATE SET
                total_points = GREATEST(user_stats.total_points + $2, 0),
                tools_implemented = user_stats.tools_implemented + $3,
                modules_completed = user_stats.modules_completed + $4,
                guides_completed = user_stats.guides_completed + $5,
                achievements_earned = user_stats.achievements_earned + $6,
                total_time_invested_minutes = user_stats.total_time_invested_minutes + $7,
                streak_days = CASE
                    WHEN $8::date IS NULL
                        OR $8::date <= user_stats.last_activity_date
                        THEN user_stats.streak_days
                    WHEN user_stats.last_activity_date = $8::date - 1
                        THEN user_stats.streak_days + 1
                    ELSE 1
                END,
                last_activity_date = GREATEST(
                    user_stats.last_activity_date,
                    COALESCE($8::date, user_stats.last_activity_date)
                )
            RETURNING total_points, streak_days, tools_implemented, modules_completed,
                      guides_completed, achievements_earned, total_time_invested_minutes,
                      last_activity_date
            "#,
        )
        .bind(user_id.as_str())
        .bind(delta.points)
        .bind(i32::try_from(delta.tools_implemented).unwrap_or(i32::MAX))
        .bind(i32::try_from(delta.modules_completed).unwrap_or(i32::MAX))
        .bind(i32::try_from(delta.guides_completed).unwrap_or(i32::MAX))
        .bind(i32::try_from(delta.achievements_earned).unwrap_or(i32::MAX))
        .bind(i64::try_from(delta.time_invested_minutes).unwrap_or(i64::MAX))
        .bind(activity_day)
        .fetch_one(&self.pool)
        .await?;

        row_to_stats(user_id, row)
    }
}
