//! Shared error type for store ports.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Two writers raced on the same derived record and retries ran out.
    #[error("Concurrent update conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            StoreError::Database(_) => ErrorCode::DatabaseError,
            StoreError::Serialization(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
