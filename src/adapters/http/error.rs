//! Mapping from domain errors to HTTP responses.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::StoreError;

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Wrapper turning a DomainError into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::ProfileNotFound
        | ErrorCode::ToolNotFound
        | ErrorCode::RecommendationNotFound
        | ErrorCode::AchievementNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidTransition | ErrorCode::AlreadyEarned => StatusCode::CONFLICT,
        ErrorCode::ConcurrencyConflict => StatusCode::CONFLICT,
        ErrorCode::AdvisoryFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "request failed");
        }
        let body = ErrorBody {
            code: self.0.code.to_string(),
            message: self.0.message,
        };
        (status, Json(body)).into_response()
    }
}
