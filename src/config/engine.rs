//! Engine tuning configuration.

use serde::Deserialize;

use super::ValidationError;

/// Tunable parameters of the recommendation engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Entries per recommendation cycle.
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_recommendation_limit() -> usize {
    6
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

impl EngineConfig {
    /// Validates the set size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.recommendation_limit == 0 {
            return Err(ValidationError::invalid(
                "engine.recommendation_limit",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
