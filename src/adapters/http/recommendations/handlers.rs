//! HTTP handlers for recommendation endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::handlers::recommendation::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, RecordFeedbackCommand,
    RecordFeedbackHandler, ResetDismissalCommand, ResetDismissalHandler,
};
use crate::domain::foundation::{ToolId, UserId};
use crate::domain::recommendation::{RecommendationEntry, RecommendationStatus};
use crate::ports::RecommendationStore;

use super::super::ApiError;
use super::dto::{
    FeedbackRequest, GenerateRequest, RecommendationSetResponse, ResetDismissalRequest,
};

/// Application state for recommendation endpoints.
#[derive(Clone)]
pub struct RecommendationsAppState {
    pub generate: Arc<GenerateRecommendationsHandler>,
    pub feedback: Arc<RecordFeedbackHandler>,
    pub reset: Arc<ResetDismissalHandler>,
    pub store: Arc<dyn RecommendationStore>,
}

/// Run a recommendation cycle for a user.
///
/// POST /api/recommendations/generate
pub async fn generate(
    State(state): State<RecommendationsAppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<RecommendationSetResponse>, ApiError> {
    let user_id = UserId::new(request.user_id)?;
    let entries = state
        .generate
        .handle(GenerateRecommendationsCommand {
            user_id,
            limit: request.limit,
        })
        .await?;
    Ok(Json(entries.into()))
}

/// Current active set for a user.
///
/// GET /api/recommendations/:user_id
pub async fn list_active(
    State(state): State<RecommendationsAppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RecommendationSetResponse>, ApiError> {
    let user_id = UserId::new(user_id)?;
    let mut entries: Vec<RecommendationEntry> = state
        .store
        .list_for_user(&user_id)
        .await?
        .into_iter()
        .filter(|e| e.status == RecommendationStatus::Active)
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(Json(entries.into()))
}

/// Record feedback on a recommended tool.
///
/// POST /api/recommendations/feedback
pub async fn record_feedback(
    State(state): State<RecommendationsAppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<RecommendationEntry>, ApiError> {
    let user_id = UserId::new(request.user_id)?;
    let tool_id = ToolId::new(request.tool_id)?;
    let entry = state
        .feedback
        .handle(RecordFeedbackCommand {
            user_id,
            tool_id,
            action: request.action,
        })
        .await?;
    Ok(Json(entry))
}

/// Administratively reset a dismissal.
///
/// POST /api/recommendations/reset
pub async fn reset_dismissal(
    State(state): State<RecommendationsAppState>,
    Json(request): Json<ResetDismissalRequest>,
) -> Result<Json<RecommendationEntry>, ApiError> {
    let user_id = UserId::new(request.user_id)?;
    let tool_id = ToolId::new(request.tool_id)?;
    let entry = state
        .reset
        .handle(ResetDismissalCommand { user_id, tool_id })
        .await?;
    Ok(Json(entry))
}
