//! HTTP handlers for progression endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::handlers::progression::{
    AwardPointsCommand, AwardPointsHandler, GetProgressionHandler, GetProgressionQuery,
    RecordActivityCommand, RecordActivityHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::gamification::ProgressionOverview;

use super::super::ApiError;
use super::dto::{AwardPointsRequest, LedgerResponse, RecordActivityRequest};

/// Application state for progression endpoints.
#[derive(Clone)]
pub struct ProgressionAppState {
    pub record_activity: Arc<RecordActivityHandler>,
    pub award_points: Arc<AwardPointsHandler>,
    pub overview: Arc<GetProgressionHandler>,
}

/// Progression overview for the dashboard panel.
///
/// GET /api/progression/:user_id
pub async fn get_overview(
    State(state): State<ProgressionAppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressionOverview>, ApiError> {
    let user_id = UserId::new(user_id)?;
    let overview = state
        .overview
        .handle(GetProgressionQuery { user_id })
        .await?;
    Ok(Json(overview))
}

/// Record one activity event.
///
/// POST /api/progression/events
pub async fn record_activity(
    State(state): State<ProgressionAppState>,
    Json(request): Json<RecordActivityRequest>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let user_id = UserId::new(request.user_id)?;
    let result = state
        .record_activity
        .handle(RecordActivityCommand {
            user_id,
            kind: request.kind,
            occurred_at: request.occurred_at,
        })
        .await?;
    Ok(Json(LedgerResponse {
        stats: result.stats,
        recorded: result.recorded,
        newly_earned: result.newly_earned,
    }))
}

/// Award or deduct points with an audit reason.
///
/// POST /api/progression/points
pub async fn award_points(
    State(state): State<ProgressionAppState>,
    Json(request): Json<AwardPointsRequest>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let user_id = UserId::new(request.user_id)?;
    let result = state
        .award_points
        .handle(AwardPointsCommand {
            user_id,
            amount: request.amount,
            reason: request.reason,
        })
        .await?;
    Ok(Json(LedgerResponse {
        stats: result.stats,
        recorded: true,
        newly_earned: result.newly_earned,
    }))
}
