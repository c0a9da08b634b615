//! PostgreSQL implementation of ToolCatalog.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{PricingModel, SetupDifficulty, TimeToValue, Tool, ToolStatus};
use crate::domain::foundation::ToolId;
use crate::ports::{StoreError, ToolCatalog};

/// PostgreSQL-backed tool catalog.
pub struct PostgresToolCatalog {
    pool: PgPool,
}

impl PostgresToolCatalog {
    /// Creates a catalog over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type ToolRow = (
    String,
    String,
    String,
    String,
    i32,
    String,
    String,
    serde_json::Value,
    serde_json::Value,
    f64,
    f64,
    String,
);

const TOOL_COLUMNS: &str = "id, name, category, pricing_model, pricing_amount, \
     setup_difficulty, time_to_value, target_roles, target_industries, \
     user_rating, popularity_score, status";

fn parse_pricing(s: &str) -> Result<PricingModel, StoreError> {
    match s {
        "free" => Ok(PricingModel::Free),
        "freemium" => Ok(PricingModel::Freemium),
        "paid" => Ok(PricingModel::Paid),
        other => Err(StoreError::Serialization(format!(
            "invalid pricing_model value: {other}"
        ))),
    }
}

fn parse_difficulty(s: &str) -> Result<SetupDifficulty, StoreError> {
    match s {
        "easy" => Ok(SetupDifficulty::Easy),
        "medium" => Ok(SetupDifficulty::Medium),
        "hard" => Ok(SetupDifficulty::Hard),
        other => Err(StoreError::Serialization(format!(
            "invalid setup_difficulty value: {other}"
        ))),
    }
}

fn parse_time_to_value(s: &str) -> Result<TimeToValue, StoreError> {
    match s {
        "minutes" => Ok(TimeToValue::Minutes),
        "hours" => Ok(TimeToValue::Hours),
        "days" => Ok(TimeToValue::Days),
        other => Err(StoreError::Serialization(format!(
            "invalid time_to_value value: {other}"
        ))),
    }
}

fn parse_status(s: &str) -> Result<ToolStatus, StoreError> {
    match s {
        "active" => Ok(ToolStatus::Active),
        "archived" => Ok(ToolStatus::Archived),
        other => Err(StoreError::Serialization(format!(
            "invalid tool status value: {other}"
        ))),
    }
}

fn row_to_tool(row: ToolRow) -> Result<Tool, StoreError> {
    let (
        id,
        name,
        category,
        pricing_model,
        pricing_amount,
        setup_difficulty,
        time_to_value,
        target_roles,
        target_industries,
        user_rating,
        popularity_score,
        status,
    ) = row;

    Ok(Tool {
        id: ToolId::new(id).map_err(|e| StoreError::Serialization(e.to_string()))?,
        name,
        category,
        pricing_model: parse_pricing(&pricing_model)?,
        pricing_amount: u32::try_from(pricing_amount)
            .map_err(|_| StoreError::Serialization("negative pricing_amount".to_string()))?,
        setup_difficulty: parse_difficulty(&setup_difficulty)?,
        time_to_value: parse_time_to_value(&time_to_value)?,
        target_roles: serde_json::from_value(target_roles)
            .map_err(|e| StoreError::Serialization(format!("invalid target_roles: {e}")))?,
        target_industries: serde_json::from_value(target_industries)
            .map_err(|e| StoreError::Serialization(format!("invalid target_industries: {e}")))?,
        user_rating,
        popularity_score,
        status: parse_status(&status)?,
    })
}

#[async_trait]
impl ToolCatalog for PostgresToolCatalog {
    async fn active_tools(&self) -> Result<Vec<Tool>, StoreError> {
        let rows: Vec<ToolRow> = sqlx::query_as(&format!(
            "SELECT {TOOL_COLUMNS} FROM tools WHERE status = 'active' ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_tool).collect()
    }

    async fn find(&self, tool_id: &ToolId) -> Result<Option<Tool>, StoreError> {
        let row: Option<ToolRow> =
            sqlx::query_as(&format!("SELECT {TOOL_COLUMNS} FROM tools WHERE id = $1"))
                .bind(tool_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.map(row_to_tool).transpose()
    }
}
