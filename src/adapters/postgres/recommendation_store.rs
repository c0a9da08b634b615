//! PostgreSQL implementation of RecommendationStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{Score, Timestamp, ToolId, UserId};
use crate::domain::recommendation::{Priority, RecommendationEntry, RecommendationStatus};
use crate::ports::{RecommendationStore, StoreError};

/// PostgreSQL-backed recommendation entries.
pub struct PostgresRecommendationStore {
    pool: PgPool,
}

impl PostgresRecommendationStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type EntryRow = (
    String,
    String,
    i16,
    String,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

const ENTRY_COLUMNS: &str =
    "user_id, tool_id, score, reason, priority, status, created_at, updated_at";

fn parse_priority(s: &str) -> Result<Priority, StoreError> {
    match s {
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        other => Err(StoreError::Serialization(format!(
            "invalid priority value: {other}"
        ))),
    }
}

fn parse_status(s: &str) -> Result<RecommendationStatus, StoreError> {
    match s {
        "active" => Ok(RecommendationStatus::Active),
        "superseded" => Ok(RecommendationStatus::Superseded),
        "dismissed" => Ok(RecommendationStatus::Dismissed),
        "implemented" => Ok(RecommendationStatus::Implemented),
        other => Err(StoreError::Serialization(format!(
            "invalid recommendation status value: {other}"
        ))),
    }
}

fn row_to_entry(row: EntryRow) -> Result<RecommendationEntry, StoreError> {
    let (user_id, tool_id, score, reason, priority, status, created_at, updated_at) = row;
    let score_u8 = u8::try_from(score)
        .map_err(|_| StoreError::Serialization("score out of range".to_string()))?;

    Ok(RecommendationEntry {
        user_id: UserId::new(user_id).map_err(|e| StoreError::Serialization(e.to_string()))?,
        tool_id: ToolId::new(tool_id).map_err(|e| StoreError::Serialization(e.to_string()))?,
        score: Score::try_new(score_u8).map_err(|e| StoreError::Serialization(e.to_string()))?,
        reason,
        priority: parse_priority(&priority)?,
        status: parse_status(&status)?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

async fn upsert_in<'e, E>(executor: E, entry: &RecommendationEntry) -> Result<(), StoreError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO recommendations (
            user_id, tool_id, score, reason, priority, status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id, tool_id) DO UPDATE SET
            score = EXCLUDED.score,
            reason = EXCLUDED.reason,
            priority = EXCLUDED.priority,
            status = EXCLUDED.status,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(entry.user_id.as_str())
    .bind(entry.tool_id.as_str())
    .bind(i16::from(entry.score.value()))
    .bind(&entry.reason)
    .bind(entry.priority.to_string())
    .bind(entry.status.to_string())
    .bind(entry.created_at.as_datetime())
    .bind(entry.updated_at.as_datetime())
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait]
impl RecommendationStore for PostgresRecommendationStore {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RecommendationEntry>, StoreError> {
        let rows: Vec<EntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM recommendations WHERE user_id = $1 ORDER BY score DESC"
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn find(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> Result<Option<RecommendationEntry>, StoreError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM recommendations WHERE user_id = $1 AND tool_id = $2"
        ))
        .bind(user_id.as_str())
        .bind(tool_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_entry).transpose()
    }

    async fn upsert(&self, entry: &RecommendationEntry) -> Result<(), StoreError> {
        upsert_in(&self.pool, entry).await
    }

    async fn replace_active_set(
        &self,
        user_id: &UserId,
        entries: &[RecommendationEntry],
    ) -> Result<(), StoreError> {
        // One transaction so a concurrent reader never sees a half
        // replaced set.
        let mut tx = self.pool.begin().await?;

        let retained: Vec<String> = entries
            .iter()
            .map(|e| e.tool_id.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            UPDATE recommendations
            SET status = 'superseded', updated_at = NOW()
            WHERE user_id = $1
              AND status = 'active'
              AND NOT (tool_id = ANY($2))
            "#,
        )
        .bind(user_id.as_str())
        .bind(&retained)
        .execute(&mut *tx)
        .await?;

        for entry in entries {
            upsert_in(&mut *tx, entry).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parser_covers_all_variants() {
        for status in ["active", "superseded", "dismissed", "implemented"] {
            assert!(parse_status(status).is_ok());
        }
        assert!(parse_status("pending").is_err());
    }

    #[test]
    fn row_round_trips_into_entry() {
        let now = Utc::now();
        let row: EntryRow = (
            "u1".to_string(),
            "notion-ai".to_string(),
            85,
            "Simple setup process".to_string(),
            "high".to_string(),
            "active".to_string(),
            now,
            now,
        );
        let entry = row_to_entry(row).unwrap();
        assert_eq!(entry.score.value(), 85);
        assert_eq!(entry.priority, Priority::High);
        assert_eq!(entry.status, RecommendationStatus::Active);
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let now = Utc::now();
        let row: EntryRow = (
            "u1".to_string(),
            "notion-ai".to_string(),
            130,
            "reason".to_string(),
            "high".to_string(),
            "active".to_string(),
            now,
            now,
        );
        assert!(row_to_entry(row).is_err());
    }
}
