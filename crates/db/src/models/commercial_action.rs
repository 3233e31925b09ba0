//! Commercial action (promotion, campaign, event...) model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `commercial_actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommercialAction {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub name: String,
    pub action_type: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub channels: Vec<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommercialAction {
    pub collection_plan_id: DbId,
    pub name: String,
    /// Defaults to `promotion` if omitted.
    pub action_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub channels: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommercialAction {
    pub name: Option<String>,
    pub action_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub channels: Option<Vec<String>>,
    pub description: Option<String>,
}
