//! StatsStore port for derived user stats.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::UserId;
use crate::domain::progression::{StatsDelta, UserStats};

use super::StoreError;

/// Persistence for per-user progression stats.
///
/// The contract deliberately has no plain `save`: counter mutations go
/// through [`StatsStore::apply`], which must be atomic relative to the
/// stored value. Two concurrent applies for the same user must both
/// land; last-write-wins on counters is unacceptable.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Reads a user's stats, if any activity was ever recorded.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, StoreError>;

    /// Atomically applies a counter delta to the stored row, creating a
    /// zeroed row first if absent. When `activity_day` is given, the
    /// streak rule runs against the stored `last_activity_date` in the
    /// same atomic step. Returns the resulting stats.
    async fn apply(
        &self,
        user_id: &UserId,
        delta: &StatsDelta,
        activity_day: Option<NaiveDate>,
    ) -> Result<UserStats, StoreError>;
}
