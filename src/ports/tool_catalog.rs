//! ToolCatalog port for catalog reads.

use async_trait::async_trait;

use crate::domain::catalog::Tool;
use crate::domain::foundation::ToolId;

use super::StoreError;

/// Read-only access to the tool catalog.
#[async_trait]
pub trait ToolCatalog: Send + Sync {
    /// All tools eligible for recommendation (catalog status active).
    async fn active_tools(&self) -> Result<Vec<Tool>, StoreError>;

    /// Looks up a single tool regardless of status.
    async fn find(&self, tool_id: &ToolId) -> Result<Option<Tool>, StoreError>;
}
