//! PostgreSQL implementation of ActivityLog.
//!
//! Events are stored with their kind payload as JSONB. The partial
//! unique index on (user_id, dedup_key) enforces idempotent inserts
//! for "mark complete" events at the database, not in process memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityKind};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::{ActivityLog, StoreError};

/// PostgreSQL-backed append-only activity log.
pub struct PostgresActivityLog {
    pool: PgPool,
}

impl PostgresActivityLog {
    /// Creates a log over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn kind_to_payload(kind: &ActivityKind) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(kind).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn payload_to_kind(payload: serde_json::Value) -> Result<ActivityKind, StoreError> {
    serde_json::from_value(payload)
        .map_err(|e| StoreError::Serialization(format!("invalid event payload: {e}")))
}

#[async_trait]
impl ActivityLog for PostgresActivityLog {
    async fn append(&self, event: &ActivityEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO activity_events (id, user_id, payload, occurred_at, dedup_key)
            VALUES ($1, $2, $3, $4, NULL)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.user_id.as_str())
        .bind(kind_to_payload(&event.kind)?)
        .bind(event.occurred_at.as_datetime())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_keyed(
        &self,
        event: &ActivityEvent,
        dedup_key: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO activity_events (id, user_id, payload, occurred_at, dedup_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, dedup_key) WHERE dedup_key IS NOT NULL DO NOTHING
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.user_id.as_str())
        .bind(kind_to_payload(&event.kind)?)
        .bind(event.occurred_at.as_datetime())
        .bind(dedup_key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn events_for_user(&self, user_id: &UserId) -> Result<Vec<ActivityEvent>, StoreError> {
        let rows: Vec<(Uuid, serde_json::Value, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, payload, occurred_at
            FROM activity_events
            WHERE user_id = $1
            ORDER BY occurred_at, id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, payload, occurred_at)| {
                Ok(ActivityEvent {
                    id: EventId::from_uuid(id),
                    user_id: user_id.clone(),
                    kind: payload_to_kind(payload)?,
                    occurred_at: Timestamp::from_datetime(occurred_at),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ToolId;

    #[test]
    fn kind_payload_round_trips() {
        let kind = ActivityKind::Implemented {
            tool_id: ToolId::new("notion-ai").unwrap(),
        };
        let payload = kind_to_payload(&kind).unwrap();
        assert_eq!(payload["kind"], "implemented");
        assert_eq!(payload_to_kind(payload).unwrap(), kind);
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let payload = serde_json::json!({ "kind": "unknown_event" });
        assert!(payload_to_kind(payload).is_err());
    }
}
