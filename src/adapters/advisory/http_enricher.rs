//! HTTP implementation of ReasonEnricher.
//!
//! Calls a chat-completions style endpoint to rewrite the deterministic
//! reason as friendlier prose. Strictly advisory: callers treat every
//! error as "use the deterministic reason".

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::catalog::Tool;
use crate::domain::profile::UserProfile;
use crate::ports::{AdvisoryError, ReasonEnricher};

const SYSTEM_PROMPT: &str = "You rewrite tool recommendation reasons for a business dashboard. \
     Rewrite the given reason as one friendly sentence for the described user. \
     Keep every factual claim; add none.";

/// Configuration for the HTTP reason enricher.
#[derive(Debug, Clone)]
pub struct HttpEnricherConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpEnricherConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions backed reason enricher.
pub struct HttpReasonEnricher {
    config: HttpEnricherConfig,
    client: Client,
}

impl HttpReasonEnricher {
    /// Creates an enricher with the given configuration.
    pub fn new(config: HttpEnricherConfig) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisoryError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn user_prompt(profile: &UserProfile, tool: &Tool, reason: &str) -> String {
        format!(
            "User: a {} in {} ({} AI experience). Tool: {} ({}). Reason: {}",
            profile.role, profile.industry, profile.ai_experience, tool.name, tool.category, reason
        )
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl ReasonEnricher for HttpReasonEnricher {
    async fn enrich(
        &self,
        profile: &UserProfile,
        tool: &Tool,
        deterministic_reason: &str,
    ) -> Result<String, AdvisoryError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::user_prompt(profile, tool, deterministic_reason),
                },
            ],
            max_tokens: 120,
            temperature: 0.4,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisoryError::Timeout
                } else {
                    AdvisoryError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AdvisoryError::Http(format!(
                "status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdvisoryError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AdvisoryError::InvalidResponse("empty completion".to_string()));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{PricingModel, SetupDifficulty, TimeToValue, ToolStatus};
    use crate::domain::foundation::{ToolId, UserId};
    use crate::domain::profile::AiExperience;

    #[test]
    fn user_prompt_carries_profile_and_tool_context() {
        let profile = UserProfile {
            user_id: UserId::new("u1").unwrap(),
            role: "Manager".to_string(),
            industry: "Technology".to_string(),
            company_size: "11-50".to_string(),
            ai_experience: AiExperience::Never,
            goals: vec![],
            time_availability: "2-4 hours/week".to_string(),
        };
        let tool = Tool {
            id: ToolId::new("notion-ai").unwrap(),
            name: "Notion AI".to_string(),
            category: "Writing".to_string(),
            pricing_model: PricingModel::Free,
            pricing_amount: 0,
            setup_difficulty: SetupDifficulty::Easy,
            time_to_value: TimeToValue::Minutes,
            target_roles: vec![],
            target_industries: vec![],
            user_rating: 4.4,
            popularity_score: 88.0,
            status: ToolStatus::Active,
        };

        let prompt = HttpReasonEnricher::user_prompt(&profile, &tool, "Free to start");
        assert!(prompt.contains("Manager"));
        assert!(prompt.contains("Notion AI"));
        assert!(prompt.contains("Free to start"));
        assert!(prompt.contains("never"));
    }

    #[test]
    fn completions_url_joins_base_and_path() {
        let enricher = HttpReasonEnricher::new(
            HttpEnricherConfig::new("test-key").with_base_url("https://advisory.internal/v1"),
        )
        .unwrap();
        assert_eq!(
            enricher.completions_url(),
            "https://advisory.internal/v1/chat/completions"
        );
    }
}
