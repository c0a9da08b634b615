//! In-memory profile reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::profile::UserProfile;
use crate::ports::{ProfileReader, StoreError};

/// In-memory store of onboarding profiles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileReader {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileReader {
    /// Creates an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile (seeding for tests and dev).
    pub async fn insert(&self, profile: UserProfile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileReader {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }
}
