//! Tool catalog context - third-party AI products eligible for recommendation.

mod tool;

pub use tool::{PricingModel, SetupDifficulty, TimeToValue, Tool, ToolStatus};
