//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `ADOPTLY` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use adoptly::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod advisory;
mod database;
mod engine;
mod error;
mod server;

pub use advisory::AdvisoryConfig;
pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has defaults suitable for local development: no
/// database (in-memory stores) and advisory enrichment disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL; optional)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Advisory reason-enrichment configuration
    #[serde(default)]
    pub advisory: AdvisoryConfig,

    /// Engine tuning (recommendation set size)
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads variables with the `ADOPTLY`
    /// prefix, `__` separated:
    ///
    /// - `ADOPTLY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ADOPTLY__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ADOPTLY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.advisory.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
