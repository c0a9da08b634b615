//! Relevance score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A recommendation relevance score between 0 and 100 inclusive.
///
/// The scoring formula can sum past 100 before clamping; `from_raw`
/// performs that clamp, which is the intended behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Minimum score.
    pub const MIN: Self = Self(0);

    /// Maximum score.
    pub const MAX: Self = Self(100);

    /// Creates a Score from an unclamped accumulator, clamping to [0, 100].
    pub fn from_raw(raw: i32) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range("score", 0, 100, i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
