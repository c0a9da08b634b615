//! Advisory enrichment configuration.

use secrecy::Secret;
use serde::Deserialize;

use super::ValidationError;

/// Configuration for the optional reason-enrichment call.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryConfig {
    /// Off by default; the deterministic reason is always available.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AdvisoryConfig {
    /// Validates that enabling enrichment comes with credentials.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.api_key.is_none() {
            return Err(ValidationError::invalid(
                "advisory.api_key",
                "required when advisory enrichment is enabled",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::invalid(
                "advisory.timeout_secs",
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
    fn disabled_without_key_is_valid() {
        assert!(AdvisoryConfig::default().validate().is_ok());
    }

    #[test]
    fn enabled_without_key_is_rejected() {
        let config = AdvisoryConfig {
            enabled: true,
            ..AdvisoryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
