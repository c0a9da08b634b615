//! Data transfer objects for progression endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::activity::ActivityKind;
use crate::domain::foundation::Timestamp;
use crate::domain::gamification::Achievement;
use crate::domain::progression::UserStats;

/// Request to record one activity event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub kind: ActivityKind,
    /// Explicit event time for replays; defaults to now.
    pub occurred_at: Option<Timestamp>,
}

/// Request to award or deduct points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsRequest {
    pub user_id: String,
    pub amount: i64,
    pub reason: String,
}

/// Result of a ledger mutation: the stats afterward plus anything it
/// unlocked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub stats: UserStats,
    pub recorded: bool,
    pub newly_earned: Vec<Achievement>,
}
