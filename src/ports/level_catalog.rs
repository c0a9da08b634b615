//! LevelCatalog port for the ordered level ladder.

use async_trait::async_trait;

use crate::domain::gamification::Level;

use super::StoreError;

/// Read-only access to the level ladder, ascending by threshold.
#[async_trait]
pub trait LevelCatalog: Send + Sync {
    /// The full ladder, ordered ascending by `points_required`, with a
    /// zero-threshold first rung.
    async fn levels(&self) -> Result<Vec<Level>, StoreError>;
}
