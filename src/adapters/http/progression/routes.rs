//! Axum router configuration for progression endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{award_points, get_overview, record_activity, ProgressionAppState};

/// Create the progression module router.
///
/// Suitable for mounting at `/api/progression`.
///
/// # Routes
///
/// - `GET /:user_id` - stats, level, achievement standing
/// - `POST /events` - record an activity event
/// - `POST /points` - award or deduct points
pub fn progression_router() -> Router<ProgressionAppState> {
    Router::new()
        .route("/:user_id", get(get_overview))
        .route("/events", post(record_activity))
        .route("/points", post(award_points))
}
