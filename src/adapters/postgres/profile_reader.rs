//! PostgreSQL implementation of ProfileReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::UserId;
use crate::domain::profile::{AiExperience, UserProfile};
use crate::ports::{ProfileReader, StoreError};

/// PostgreSQL-backed profile lookups.
pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    /// Creates a reader over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_experience(s: &str) -> Result<AiExperience, StoreError> {
    match s {
        "never" => Ok(AiExperience::Never),
        "beginner" => Ok(AiExperience::Beginner),
        "intermediate" => Ok(AiExperience::Intermediate),
        "advanced" => Ok(AiExperience::Advanced),
        other => Err(StoreError::Serialization(format!(
            "invalid ai_experience value: {other}"
        ))),
    }
}

fn parse_string_array(value: serde_json::Value, field: &str) -> Result<Vec<String>, StoreError> {
    serde_json::from_value(value)
        .map_err(|e| StoreError::Serialization(format!("invalid {field} array: {e}")))
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let row: Option<(String, String, String, String, serde_json::Value, String)> =
            sqlx::query_as(
                r#"
                SELECT role, industry, company_size, ai_experience, goals, time_availability
                FROM user_profiles
                WHERE user_id = $1
                "#,
            )
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some((role, industry, company_size, experience, goals, time_availability)) = row
        else {
            return Ok(None);
        };

        Ok(Some(UserProfile {
            user_id: user_id.clone(),
            role,
            industry,
            company_size,
            ai_experience: parse_experience(&experience)?,
            goals: parse_string_array(goals, "goals")?,
            time_availability,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_experience_accepts_known_values() {
        assert_eq!(parse_experience("never").unwrap(), AiExperience::Never);
        assert_eq!(parse_experience("advanced").unwrap(), AiExperience::Advanced);
    }

    #[test]
    fn parse_experience_rejects_unknown_values() {
        assert!(parse_experience("expert").is_err());
    }

    #[test]
    fn parse_string_array_reads_json_list() {
        let value = serde_json::json!(["Save time", "Automate reports"]);
        let goals = parse_string_array(value, "goals").unwrap();
        assert_eq!(goals.len(), 2);
    }
}
