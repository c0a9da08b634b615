//! Level ladder - pure threshold lookups over cumulative points.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percent;

/// One rung of the level ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub slug: String,
    pub name: String,
    pub points_required: u64,
}

/// Built-in ladder, ascending by threshold. The zero-threshold entry
/// guarantees every user has a current level.
pub static DEFAULT_LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    let ladder = [
        ("ai-novice", "AI Novice", 0),
        ("ai-explorer", "AI Explorer", 100),
        ("ai-practitioner", "AI Practitioner", 250),
        ("ai-power-user", "AI Power User", 500),
        ("ai-champion", "AI Champion", 1000),
        ("ai-transformer", "AI Transformer", 2000),
    ];
    ladder
        .into_iter()
        .map(|(slug, name, points_required)| Level {
            slug: slug.to_string(),
            name: name.to_string(),
            points_required,
        })
        .collect()
});

/// Returns the built-in level ladder.
pub fn default_levels() -> &'static [Level] {
    &DEFAULT_LEVELS
}

/// The greatest-threshold level at or below `points`.
///
/// Falls back to the first rung if the ladder (unexpectedly) starts
/// above `points`.
pub fn current_level(levels: &[Level], points: u64) -> &Level {
    levels
        .iter()
        .rev()
        .find(|l| l.points_required <= points)
        .unwrap_or(&levels[0])
}

/// The smallest-threshold level above `points`, or None at max level.
pub fn next_level(levels: &[Level], points: u64) -> Option<&Level> {
    levels.iter().find(|l| l.points_required > points)
}

/// Progress from the current rung toward the next, clamped to [0, 100].
/// Returns 100 at max level.
pub fn level_progress(levels: &[Level], points: u64) -> Percent {
    let current = current_level(levels, points);
    match next_level(levels, points) {
        None => Percent::HUNDRED,
        Some(next) => {
            let span = next.points_required - current.points_required;
            let into = points.saturating_sub(current.points_required);
            Percent::of_progress(into, span)
        }
    }
}
