//! Percent value object (0-100 scale) for progress display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A progress value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percent, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Computes `current / target` as a percentage, clamped to [0, 100].
    ///
    /// A zero target counts as already met.
    pub fn of_progress(current: u64, target: u64) -> Self {
        if target == 0 || current >= target {
            return Self::HUNDRED;
        }
        Self((current * 100 / target) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
