//! Drop (release wave) entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `drops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanDrop {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub name: String,
    pub drop_number: Option<i32>,
    pub launch_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub channels: Vec<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a drop.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanDrop {
    pub collection_plan_id: DbId,
    pub name: String,
    pub drop_number: Option<i32>,
    pub launch_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub channels: Option<Vec<String>>,
    pub description: Option<String>,
}

/// DTO for updating a drop. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlanDrop {
    pub name: Option<String>,
    pub drop_number: Option<i32>,
    pub launch_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub channels: Option<Vec<String>>,
    pub description: Option<String>,
}
