//! Configuration error types.

use thiserror::Error;

/// Errors loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid configuration for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    /// Creates a validation error for a field.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
