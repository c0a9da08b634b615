//! In-memory tool catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::Tool;
use crate::domain::foundation::ToolId;
use crate::ports::{StoreError, ToolCatalog};

/// In-memory catalog of tools.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToolCatalog {
    tools: Arc<RwLock<HashMap<ToolId, Tool>>>,
}

impl InMemoryToolCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the given tools.
    pub async fn with_tools(tools: Vec<Tool>) -> Self {
        let catalog = Self::new();
        for tool in tools {
            catalog.insert(tool).await;
        }
        catalog
    }

    /// Inserts or replaces a tool.
    pub async fn insert(&self, tool: Tool) {
        let mut tools = self.tools.write().await;
        tools.insert(tool.id.clone(), tool);
    }
}

#[async_trait]
impl ToolCatalog for InMemoryToolCatalog {
    async fn active_tools(&self) -> Result<Vec<Tool>, StoreError> {
        let tools = self.tools.read().await;
        Ok(tools.values().filter(|t| t.is_active()).cloned().collect())
    }

    async fn find(&self, tool_id: &ToolId) -> Result<Option<Tool>, StoreError> {
        let tools = self.tools.read().await;
        Ok(tools.get(tool_id).cloned())
    }
}
