//! Activity event context.
//!
//! The activity log is the append-only source of truth for all derived
//! state: user stats and recommendation feedback must be reconstructable
//! by replaying it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, ToolId, UserId};

/// What happened, with its typed payload.
///
/// Completion-style kinds are state transitions, not counter ticks:
/// they carry a dedup key so a replayed event cannot double-count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ActivityKind {
    /// User viewed a tool's detail card.
    Viewed { tool_id: ToolId },
    /// User dismissed a recommended tool.
    Dismissed { tool_id: ToolId },
    /// User marked a tool as implemented in their workflow.
    Implemented { tool_id: ToolId },
    /// User finished a learning module.
    ModuleCompleted { slug: String },
    /// User finished a setup guide.
    GuideCompleted { slug: String },
    /// A usage session with its duration.
    Session { minutes: u64 },
}

impl ActivityKind {
    /// Dedup key for idempotent "mark complete" events.
    ///
    /// `None` means the event is a plain append (viewed, dismissed,
    /// session) and every occurrence counts.
    pub fn dedup_key(&self) -> Option<String> {
        match self {
            Self::Implemented { tool_id } => Some(format!("implemented:{}", tool_id)),
            Self::ModuleCompleted { slug } => Some(format!("module:{}", slug)),
            Self::GuideCompleted { slug } => Some(format!("guide:{}", slug)),
            Self::Viewed { .. } | Self::Dismissed { .. } | Self::Session { .. } => None,
        }
    }

    /// The tool this event refers to, if any.
    pub fn tool_id(&self) -> Option<&ToolId> {
        match self {
            Self::Viewed { tool_id } | Self::Dismissed { tool_id } | Self::Implemented { tool_id } => {
                Some(tool_id)
            }
            _ => None,
        }
    }
}

/// One immutable interaction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: EventId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub kind: ActivityKind,
    pub occurred_at: Timestamp,
}

impl ActivityEvent {
    /// Creates a new event stamped with the current time.
    pub fn new(user_id: UserId, kind: ActivityKind) -> Self {
        Self {
            id: EventId::new(),
            user_id,
            kind,
            occurred_at: Timestamp::now(),
        }
    }

    /// Creates an event at an explicit time (replays, backfills, tests).
    pub fn at(user_id: UserId, kind: ActivityKind, occurred_at: Timestamp) -> Self {
        Self {
            id: EventId::new(),
            user_id,
            kind,
            occurred_at,
        }
    }
}
