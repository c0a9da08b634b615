//! UserStats and the delta type mutating them.
//!
//! Every counter is monotonically non-decreasing except `streak_days`.
//! Stats are a derived view: replaying the activity log must reproduce
//! them, so all mutation flows through [`StatsDelta`] and
//! [`UserStats::record_activity_day`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::activity::ActivityKind;
use crate::domain::foundation::UserId;

/// Cumulative per-user progression counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: UserId,
    pub total_points: u64,
    pub streak_days: u32,
    pub tools_implemented: u32,
    pub modules_completed: u32,
    pub guides_completed: u32,
    pub achievements_earned: u32,
    pub total_time_invested_minutes: u64,
    pub last_activity_date: Option<NaiveDate>,
}

impl UserStats {
    /// Fresh zeroed stats, created lazily on first activity.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            total_points: 0,
            streak_days: 0,
            tools_implemented: 0,
            modules_completed: 0,
            guides_completed: 0,
            achievements_earned: 0,
            total_time_invested_minutes: 0,
            last_activity_date: None,
        }
    }

    /// Applies a counter delta. Points floor at zero on deductions.
    pub fn apply_delta(&mut self, delta: &StatsDelta) {
        self.total_points = (self.total_points as i64 + delta.points).max(0) as u64;
        self.tools_implemented += delta.tools_implemented;
        self.modules_completed += delta.modules_completed;
        self.guides_completed += delta.guides_completed;
        self.achievements_earned += delta.achievements_earned;
        self.total_time_invested_minutes += delta.time_invested_minutes;
    }

    /// Updates the streak for one activity day.
    ///
    /// Consecutive day: +1. Same day: unchanged. Gap of two or more
    /// days, or first ever activity: reset to 1. A day at or before the
    /// recorded last activity (out-of-order replay) is already counted
    /// and leaves the streak untouched.
    pub fn record_activity_day(&mut self, day: NaiveDate) {
        match self.last_activity_date {
            None => self.streak_days = 1,
            Some(last) if day <= last => return,
            Some(last) if day == last + chrono::Duration::days(1) => self.streak_days += 1,
            Some(_) => self.streak_days = 1,
        }
        self.last_activity_date = Some(day);
    }
}

/// Additive mutation applied atomically at the storage boundary.
///
/// Handlers never compute `new = old + delta` from a read they do not
/// commit atomically; they hand the delta to the store instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDelta {
    /// Signed: point deductions are floored at zero when applied.
    pub points: i64,
    pub tools_implemented: u32,
    pub modules_completed: u32,
    pub guides_completed: u32,
    pub achievements_earned: u32,
    pub time_invested_minutes: u64,
}

impl StatsDelta {
    /// Delta for a points award or deduction.
    pub fn points(amount: i64) -> Self {
        Self { points: amount, ..Self::default() }
    }

    /// Delta for one newly earned achievement and its reward points.
    pub fn achievement(reward_points: u32) -> Self {
        Self {
            points: i64::from(reward_points),
            achievements_earned: 1,
            ..Self::default()
        }
    }

    /// Counter delta implied by an activity event.
    ///
    /// Viewed and dismissed events carry no counters; they only touch
    /// the streak.
    pub fn for_kind(kind: &ActivityKind) -> Self {
        match kind {
            ActivityKind::Implemented { .. } => Self { tools_implemented: 1, ..Self::default() },
            ActivityKind::ModuleCompleted { .. } => Self { modules_completed: 1, ..Self::default() },
            ActivityKind::GuideCompleted { .. } => Self { guides_completed: 1, ..Self::default() },
            ActivityKind::Session { minutes } => Self { time_invested_minutes: *minutes, ..Self::default() },
            ActivityKind::Viewed { .. } | ActivityKind::Dismissed { .. } => Self::default(),
        }
    }

    /// Whether the delta changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
