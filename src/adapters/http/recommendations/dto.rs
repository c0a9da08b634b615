//! Data transfer objects for recommendation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::recommendation::FeedbackAction;
use crate::domain::recommendation::RecommendationEntry;

/// Request to run a recommendation cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_id: String,
    /// Optional override of the configured set size.
    pub limit: Option<usize>,
}

/// Request to record feedback on a recommended tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub user_id: String,
    pub tool_id: String,
    pub action: FeedbackAction,
}

/// Request to administratively reset a dismissal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetDismissalRequest {
    pub user_id: String,
    pub tool_id: String,
}

/// A set of recommendation entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSetResponse {
    pub count: usize,
    pub recommendations: Vec<RecommendationEntry>,
}

impl From<Vec<RecommendationEntry>> for RecommendationSetResponse {
    fn from(recommendations: Vec<RecommendationEntry>) -> Self {
        Self {
            count: recommendations.len(),
            recommendations,
        }
    }
}
