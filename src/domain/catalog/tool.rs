//! Tool record and its classification enums.
//!
//! Tools are owned by catalog administration and are immutable from the
//! engine's perspective.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ToolId;

/// Pricing model of a catalog tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Freemium => write!(f, "freemium"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// How involved the initial setup is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for SetupDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Coarse bucket for how quickly a tool pays off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeToValue {
    Minutes,
    Hours,
    Days,
}

impl fmt::Display for TimeToValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
            Self::Days => write!(f, "days"),
        }
    }
}

/// Catalog lifecycle status. Only active tools enter candidate pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Active,
    Archived,
}

/// A third-party AI product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub category: String,
    pub pricing_model: PricingModel,
    /// Monthly price in whole dollars; 0 for free tools.
    pub pricing_amount: u32,
    pub setup_difficulty: SetupDifficulty,
    pub time_to_value: TimeToValue,
    pub target_roles: Vec<String>,
    pub target_industries: Vec<String>,
    /// Average user rating on a 0-5 scale.
    pub user_rating: f64,
    pub popularity_score: f64,
    pub status: ToolStatus,
}

impl Tool {
    /// Whether the tool targets the given role.
    pub fn targets_role(&self, role: &str) -> bool {
        self.target_roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Whether the tool targets the given industry.
    pub fn targets_industry(&self, industry: &str) -> bool {
        self.target_industries
            .iter()
            .any(|i| i.eq_ignore_ascii_case(industry))
    }

    /// Whether the tool is eligible for recommendation cycles.
    pub fn is_active(&self) -> bool {
        self.status == ToolStatus::Active
    }
}
