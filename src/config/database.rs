//! Database configuration.

use serde::Deserialize;

use super::ValidationError;

/// PostgreSQL configuration.
///
/// The URL is optional: without one the application runs on in-memory
/// stores, which is the local development mode.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Validates the URL scheme and pool bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::invalid(
                    "database.url",
                    "must be a postgres:// URL",
                ));
            }
        }
        if self.max_connections == 0 {
            return Err(ValidationError::invalid(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_valid_development_mode() {
        assert!(DatabaseConfig::default().validate().is_ok());
    }

    #[test]
    fn non_postgres_url_is_rejected() {
        let config = DatabaseConfig {
            url: Some("mysql://localhost/adoptly".to_string()),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
