//! User profile context.
//!
//! A profile is created at onboarding completion and mutated only by
//! explicit edits; the engine reads it to personalize scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::UserId;

/// How much hands-on AI experience the user reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiExperience {
    Never,
    Beginner,
    Intermediate,
    Advanced,
}

impl AiExperience {
    /// Whether the user has no prior AI exposure.
    pub fn is_novice(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for AiExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Onboarding profile driving recommendation personalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub role: String,
    pub industry: String,
    pub company_size: String,
    pub ai_experience: AiExperience,
    /// Ordered by the user at onboarding; first entry is the primary goal.
    pub goals: Vec<String>,
    pub time_availability: String,
}

impl UserProfile {
    /// The user's primary goal, if any were chosen.
    pub fn primary_goal(&self) -> Option<&str> {
        self.goals.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            user_id: UserId::new("user-1").unwrap(),
            role: "Manager".to_string(),
            industry: "Technology".to_string(),
            company_size: "11-50".to_string(),
            ai_experience: AiExperience::Never,
            goals: vec!["Save time".to_string(), "Automate reports".to_string()],
            time_availability: "2-4 hours/week".to_string(),
        }
    }

    #[test]
    fn never_experience_is_novice() {
        assert!(AiExperience::Never.is_novice());
        assert!(!AiExperience::Beginner.is_novice());
    }

    #[test]
    fn primary_goal_is_first_entry() {
        assert_eq!(sample_profile().primary_goal(), Some("Save time"));
    }

    #[test]
    fn primary_goal_absent_when_no_goals() {
        let mut profile = sample_profile();
        profile.goals.clear();
        assert_eq!(profile.primary_goal(), None);
    }

    #[test]
    fn experience_serializes_snake_case() {
        let json = serde_json::to_string(&AiExperience::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }
}
