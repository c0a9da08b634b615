//! ProfileReader port for onboarding profile lookups.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::UserProfile;

use super::StoreError;

/// Read-only access to user onboarding profiles.
///
/// A missing profile is a normal outcome (the user has not completed
/// onboarding), not an error.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Finds the profile for a user, if onboarding was completed.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;
}
