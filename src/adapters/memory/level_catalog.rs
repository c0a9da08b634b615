//! Static level catalog adapter.

use async_trait::async_trait;

use crate::domain::gamification::{default_levels, Level};
use crate::ports::{LevelCatalog, StoreError};

/// Level catalog served from a fixed in-process ladder.
#[derive(Debug, Clone)]
pub struct StaticLevelCatalog {
    levels: Vec<Level>,
}

impl StaticLevelCatalog {
    /// Creates a catalog with the built-in ladder.
    pub fn new() -> Self {
        Self {
            levels: default_levels().to_vec(),
        }
    }

    /// Creates a catalog with a custom ladder (tests). The ladder must
    /// be ascending with a zero-threshold first rung.
    pub fn with_levels(levels: Vec<Level>) -> Self {
        Self { levels }
    }
}

impl Default for StaticLevelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LevelCatalog for StaticLevelCatalog {
    async fn levels(&self) -> Result<Vec<Level>, StoreError> {
        Ok(self.levels.clone())
    }
}
