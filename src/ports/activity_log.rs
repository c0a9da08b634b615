//! ActivityLog port - the append-only source of truth.

use async_trait::async_trait;

use crate::domain::activity::ActivityEvent;
use crate::domain::foundation::UserId;

use super::StoreError;

/// Append-only event log with keyed inserts for idempotent events.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends an event. Every call records a new row.
    async fn append(&self, event: &ActivityEvent) -> Result<(), StoreError>;

    /// Insert-if-absent keyed by `(user, dedup_key)`. Returns true when
    /// the event was newly recorded, false when the key already existed
    /// (a replay). Used for "mark complete" events whose meaning is a
    /// state transition, not a counter tick.
    async fn insert_keyed(
        &self,
        event: &ActivityEvent,
        dedup_key: &str,
    ) -> Result<bool, StoreError>;

    /// All events for a user in append order (replays, audits).
    async fn events_for_user(&self, user_id: &UserId) -> Result<Vec<ActivityEvent>, StoreError>;
}
