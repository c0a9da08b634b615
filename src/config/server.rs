//! Server configuration.

use serde::Deserialize;
use std::net::SocketAddr;

use super::ValidationError;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// The address to bind, as "host:port".
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates host and port.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::invalid("server.host", "must not be empty"));
        }
        if self.socket_addr().parse::<SocketAddr>().is_err() && self.host != "localhost" {
            return Err(ValidationError::invalid(
                "server.host",
                "must be a valid address",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_host_is_invalid() {
        let config = ServerConfig {
            host: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
