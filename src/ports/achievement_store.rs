//! AchievementStore port - catalog reads and earned-row inserts.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::gamification::{Achievement, UserAchievement};

use super::StoreError;

/// Achievement catalog plus per-user earned rows.
#[async_trait]
pub trait AchievementStore: Send + Sync {
    /// The full static achievement catalog.
    async fn catalog(&self) -> Result<Vec<Achievement>, StoreError>;

    /// All achievements the user has earned.
    async fn earned_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, StoreError>;

    /// Insert-if-absent keyed by (user, achievement). Returns true when
    /// the row was newly created. Uniqueness lives here, not in the
    /// caller's predicate re-check - duplicate earn attempts are no-ops.
    async fn insert_if_absent(&self, earned: &UserAchievement) -> Result<bool, StoreError>;
}
