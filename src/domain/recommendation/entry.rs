//! RecommendationEntry and its soft status transitions.
//!
//! At most one non-superseded entry exists per (user, tool). Entries are
//! never hard-deleted; a generation cycle supersedes actives it does not
//! re-produce, while dismissed and implemented entries are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, Score, Timestamp, ToolId, UserId};

/// Coarse display bucket derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed thresholds: >= 80 high, >= 60 medium, else low.
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            80..=100 => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Lifecycle of a recommendation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    /// Currently surfaced in the user's active set.
    Active,
    /// Fell out of a later generation cycle; eligible to return.
    Superseded,
    /// User declined; terminal absent an administrative reset.
    Dismissed,
    /// User adopted the tool; terminal.
    Implemented,
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Superseded => write!(f, "superseded"),
            Self::Dismissed => write!(f, "dismissed"),
            Self::Implemented => write!(f, "implemented"),
        }
    }
}

/// One ranked recommendation for a (user, tool) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
    pub user_id: UserId,
    pub tool_id: ToolId,
    pub score: Score,
    pub reason: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RecommendationEntry {
    /// Creates a fresh active entry from a scoring result.
    pub fn active(user_id: UserId, tool_id: ToolId, score: Score, reason: String) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            tool_id,
            score,
            reason,
            priority: Priority::from_score(score),
            status: RecommendationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transitions the entry to dismissed.
    ///
    /// Dismissing an implemented entry is rejected; dismissing an
    /// already-dismissed entry is a no-op.
    pub fn dismiss(&mut self) -> Result<(), DomainError> {
        match self.status {
            RecommendationStatus::Implemented => Err(DomainError::invalid_transition(
                "Cannot dismiss an implemented recommendation",
            )
            .with_detail("tool_id", self.tool_id.to_string())),
            RecommendationStatus::Dismissed => Ok(()),
            _ => {
                self.status = RecommendationStatus::Dismissed;
                self.updated_at = Timestamp::now();
                Ok(())
            }
        }
    }

    /// Transitions the entry to implemented.
    ///
    /// Re-implementing is a no-op; a dismissed entry can still be
    /// implemented (the user changed their mind through another path).
    pub fn implement(&mut self) -> Result<(), DomainError> {
        if self.status == RecommendationStatus::Implemented {
            return Ok(());
        }
        self.status = RecommendationStatus::Implemented;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks an active entry as fallen out of the latest cycle.
    pub fn supersede(&mut self) {
        if self.status == RecommendationStatus::Active {
            self.status = RecommendationStatus::Superseded;
            self.updated_at = Timestamp::now();
        }
    }

    /// Administrative reset: returns a dismissed entry to the candidate
    /// pool. The only sanctioned path out of dismissal.
    pub fn reset_dismissal(&mut self) -> Result<(), DomainError> {
        match self.status {
            RecommendationStatus::Dismissed => {
                self.status = RecommendationStatus::Superseded;
                self.updated_at = Timestamp::now();
                Ok(())
            }
            _ => Err(DomainError::invalid_transition(
                "Only dismissed recommendations can be reset",
            )
            .with_detail("status", self.status.to_string())),
        }
    }

    /// Whether this entry permanently excludes its tool from candidate
    /// pools.
    pub fn excludes_from_candidates(&self) -> bool {
        matches!(
            self.status,
            RecommendationStatus::Dismissed | RecommendationStatus::Implemented
        )
    }
}
