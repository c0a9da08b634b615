//! Additive relevance heuristic.
//!
//! Deterministic and explainable: every bonus that fires contributes a
//! human-readable fragment to the reason string, so the dashboard can
//! always show "why this tool". Not a trained model.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{PricingModel, SetupDifficulty, TimeToValue, Tool};
use crate::domain::foundation::{Score, ToolId};
use crate::domain::profile::UserProfile;

/// Base score every candidate starts from.
const BASE_SCORE: i32 = 50;

/// Paid tools at or under this monthly price still earn a pricing bonus.
const AFFORDABLE_PAID_CEILING: u32 = 20;

/// Separator between reason fragments.
const FRAGMENT_SEPARATOR: &str = " \u{2022} ";

/// Behavioral signals summarized from the activity log.
///
/// The current formula does not weight these; the field keeps the
/// contract's three-input shape so ranking signals can be added without
/// changing call sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub recently_viewed: Vec<ToolId>,
}

/// Result of scoring one candidate tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredTool {
    pub value: Score,
    pub reason: String,
}

/// Scores a single tool against a profile.
///
/// Additive: base 50, plus bonuses for easy setup, fast time-to-value,
/// role match, accessible pricing, and a novice-accessibility bonus.
/// The raw sum can exceed 100 and is clamped; clamping (rather than
/// renormalizing) is the intended behavior.
pub fn score(tool: &Tool, profile: &UserProfile, _summary: &ActivitySummary) -> ScoredTool {
    let mut raw = BASE_SCORE;
    let mut fragments: Vec<String> = Vec::new();

    if tool.setup_difficulty == SetupDifficulty::Easy {
        raw += 20;
        fragments.push("Simple setup process".to_string());
    }

    match tool.time_to_value {
        TimeToValue::Minutes => {
            raw += 25;
            fragments.push("Delivers value in minutes".to_string());
        }
        TimeToValue::Hours => {
            raw += 15;
            fragments.push("Delivers value within hours".to_string());
        }
        TimeToValue::Days => {}
    }

    if tool.targets_role(&profile.role) {
        raw += 20;
        fragments.push(format!("Perfect for {}s", profile.role));
    }

    match tool.pricing_model {
        PricingModel::Free => {
            raw += 15;
            fragments.push("Free to start".to_string());
        }
        PricingModel::Freemium => {
            raw += 10;
            fragments.push("Free tier available".to_string());
        }
        PricingModel::Paid if tool.pricing_amount <= AFFORDABLE_PAID_CEILING => {
            raw += 5;
            fragments.push("Affordable paid plan".to_string());
        }
        PricingModel::Paid => {}
    }

    if profile.ai_experience.is_novice() && tool.setup_difficulty == SetupDifficulty::Easy {
        raw += 10;
        fragments.push("Great first AI tool for beginners".to_string());
    }

    let reason = if fragments.is_empty() {
        // Base-only score: no bonus fired, but the tool is still a
        // candidate. Absence of a match is not a disqualifier.
        "Broadly useful productivity tool".to_string()
    } else {
        fragments.join(FRAGMENT_SEPARATOR)
    };

    ScoredTool {
        value: Score::from_raw(raw),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ToolStatus;
    use crate::domain::foundation::UserId;
    use crate::domain::profile::AiExperience;
    use proptest::prelude::*;

    fn tool_base() -> Tool {
        Tool {
            id: ToolId::new("sample-tool").unwrap(),
            name: "Sample Tool".to_string(),
            category: "Automation".to_string(),
            pricing_model: PricingModel::Paid,
            pricing_amount: 99,
            setup_difficulty: SetupDifficulty::Hard,
            time_to_value: TimeToValue::Days,
            target_roles: vec![],
            target_industries: vec![],
            user_rating: 3.5,
            popularity_score: 10.0,
            status: ToolStatus::Active,
        }
    }

    fn profile_base() -> UserProfile {
        UserProfile {
            user_id: UserId::new("user-1").unwrap(),
            role: "Manager".to_string(),
            industry: "Technology".to_string(),
            company_size: "11-50".to_string(),
            ai_experience: AiExperience::Intermediate,
            goals: vec![],
            time_availability: "1-2 hours/week".to_string(),
        }
    }

    #[test]
    fn base_only_tool_scores_fifty() {
        let result = score(&tool_base(), &profile_base(), &ActivitySummary::default());
        assert_eq!(result.value.value(), 50);
        assert_eq!(result.reason, "Broadly useful productivity tool");
    }

    #[test]
    fn all_bonuses_clamp_to_one_hundred() {
        // 50 + 20 (easy) + 25 (minutes) + 20 (role) + 15 (free) + 10 (novice) = 140
        let mut tool = tool_base();
        tool.setup_difficulty = SetupDifficulty::Easy;
        tool.time_to_value = TimeToValue::Minutes;
        tool.pricing_model = PricingModel::Free;
        tool.target_roles = vec!["Manager".to_string()];
        let mut profile = profile_base();
        profile.ai_experience = AiExperience::Never;

        let result = score(&tool, &profile, &ActivitySummary::default());
        assert_eq!(result.value, Score::MAX);
        assert!(result.reason.contains("Simple setup process"));
        assert!(result.reason.contains("Delivers value in minutes"));
        assert!(result.reason.contains("Perfect for Managers"));
        assert!(result.reason.contains("Free to start"));
        assert!(result.reason.contains("Great first AI tool for beginners"));
    }

    #[test]
    fn hours_to_value_earns_smaller_bonus_than_minutes() {
        let mut fast = tool_base();
        fast.time_to_value = TimeToValue::Minutes;
        let mut slower = tool_base();
        slower.time_to_value = TimeToValue::Hours;

        let profile = profile_base();
        let summary = ActivitySummary::default();
        assert_eq!(score(&fast, &profile, &summary).value.value(), 75);
        assert_eq!(score(&slower, &profile, &summary).value.value(), 65);
    }

    #[test]
    fn affordable_paid_tool_earns_pricing_bonus() {
        let mut tool = tool_base();
        tool.pricing_amount = 20;
        let result = score(&tool, &profile_base(), &ActivitySummary::default());
        assert_eq!(result.value.value(), 55);
        assert!(result.reason.contains("Affordable paid plan"));
    }

    #[test]
    fn expensive_paid_tool_earns_no_pricing_bonus() {
        let mut tool = tool_base();
        tool.pricing_amount = 21;
        let result = score(&tool, &profile_base(), &ActivitySummary::default());
        assert_eq!(result.value.value(), 50);
    }

    #[test]
    fn novice_bonus_requires_easy_setup() {
        let mut profile = profile_base();
        profile.ai_experience = AiExperience::Never;

        // Hard setup: no novice bonus even for a novice.
        let result = score(&tool_base(), &profile, &ActivitySummary::default());
        assert_eq!(result.value.value(), 50);

        let mut easy = tool_base();
        easy.setup_difficulty = SetupDifficulty::Easy;
        let result = score(&easy, &profile, &ActivitySummary::default());
        // 50 + 20 (easy) + 10 (novice)
        assert_eq!(result.value.value(), 80);
        assert!(result.reason.contains("Great first AI tool for beginners"));
    }

    #[test]
    fn no_role_match_is_not_disqualifying() {
        let mut tool = tool_base();
        tool.setup_difficulty = SetupDifficulty::Easy;
        tool.pricing_model = PricingModel::Free;
        tool.target_roles = vec!["Designer".to_string()];

        let result = score(&tool, &profile_base(), &ActivitySummary::default());
        // 50 + 20 + 15, no role bonus
        assert_eq!(result.value.value(), 85);
        assert!(!result.reason.contains("Perfect for"));
    }

    #[test]
    fn scoring_is_deterministic() {
        let tool = tool_base();
        let profile = profile_base();
        let summary = ActivitySummary::default();
        let first = score(&tool, &profile, &summary);
        let second = score(&tool, &profile, &summary);
        assert_eq!(first, second);
    }

    fn arb_pricing() -> impl Strategy<Value = (PricingModel, u32)> {
        prop_oneof![
            Just(PricingModel::Free).prop_map(|p| (p, 0)),
            Just(PricingModel::Freemium).prop_map(|p| (p, 0)),
            (0u32..200).prop_map(|amt| (PricingModel::Paid, amt)),
        ]
    }

    fn arb_difficulty() -> impl Strategy<Value = SetupDifficulty> {
        prop_oneof![
            Just(SetupDifficulty::Easy),
            Just(SetupDifficulty::Medium),
            Just(SetupDifficulty::Hard),
        ]
    }

    fn arb_time_to_value() -> impl Strategy<Value = TimeToValue> {
        prop_oneof![
            Just(TimeToValue::Minutes),
            Just(TimeToValue::Hours),
            Just(TimeToValue::Days),
        ]
    }

    fn arb_experience() -> impl Strategy<Value = AiExperience> {
        prop_oneof![
            Just(AiExperience::Never),
            Just(AiExperience::Beginner),
            Just(AiExperience::Intermediate),
            Just(AiExperience::Advanced),
        ]
    }

    proptest! {
        #[test]
        fn score_is_always_bounded(
            (pricing_model, pricing_amount) in arb_pricing(),
            setup_difficulty in arb_difficulty(),
            time_to_value in arb_time_to_value(),
            ai_experience in arb_experience(),
            role_matches in any::<bool>(),
        ) {
            let mut tool = tool_base();
            tool.pricing_model = pricing_model;
            tool.pricing_amount = pricing_amount;
            tool.setup_difficulty = setup_difficulty;
            tool.time_to_value = time_to_value;
            if role_matches {
                tool.target_roles = vec!["Manager".to_string()];
            }
            let mut profile = profile_base();
            profile.ai_experience = ai_experience;

            let result = score(&tool, &profile, &ActivitySummary::default());
            prop_assert!(result.value <= Score::MAX);
            prop_assert!(!result.reason.is_empty());
        }
    }
}
