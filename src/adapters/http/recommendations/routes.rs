//! Axum router configuration for recommendation endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{generate, list_active, record_feedback, reset_dismissal, RecommendationsAppState};

/// Create the recommendations module router.
///
/// Suitable for mounting at `/api/recommendations`.
///
/// # Routes
///
/// - `POST /generate` - run a recommendation cycle
/// - `GET /:user_id` - current active set
/// - `POST /feedback` - record interested/dismissed/implementing
/// - `POST /reset` - administrative dismissal reset
pub fn recommendations_router() -> Router<RecommendationsAppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/:user_id", get(list_active))
        .route("/feedback", post(record_feedback))
        .route("/reset", post(reset_dismissal))
}
