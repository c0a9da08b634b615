//! ReasonEnricher port - optional advisory text enrichment.
//!
//! An external language-model call may rewrite the deterministic reason
//! string into friendlier prose. It is strictly advisory: absence,
//! timeout, or failure must never block a recommendation cycle, and the
//! deterministic reason is always the fallback.

use async_trait::async_trait;

use crate::domain::catalog::Tool;
use crate::domain::profile::UserProfile;

/// Errors from the advisory enrichment call.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("Advisory call timed out")]
    Timeout,

    #[error("Advisory HTTP error: {0}")]
    Http(String),

    #[error("Advisory response malformed: {0}")]
    InvalidResponse(String),
}

/// Opaque advisory collaborator enriching recommendation reasons.
#[async_trait]
pub trait ReasonEnricher: Send + Sync {
    /// Produces an enriched reason for recommending `tool` to the
    /// profiled user. Callers fall back to `deterministic_reason` on
    /// any error.
    async fn enrich(
        &self,
        profile: &UserProfile,
        tool: &Tool,
        deterministic_reason: &str,
    ) -> Result<String, AdvisoryError>;
}
