//! SKU entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `skus` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sku {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub drop_id: Option<DbId>,
    pub name: String,
    pub reference: Option<String>,
    pub family: String,
    pub category: Option<String>,
    pub color: Option<String>,
    /// Retail price.
    pub pvp: f64,
    /// Unit cost.
    pub cost: f64,
    /// Gross margin as a percentage of `pvp`.
    pub margin: Option<f64>,
    pub units: i32,
    pub channel: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a SKU.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSku {
    pub collection_plan_id: DbId,
    pub drop_id: Option<DbId>,
    pub name: String,
    pub reference: Option<String>,
    pub family: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub pvp: f64,
    pub cost: f64,
    /// Computed from `pvp` and `cost` when omitted.
    pub margin: Option<f64>,
    pub units: Option<i32>,
    pub channel: Option<String>,
    pub launch_date: Option<NaiveDate>,
}

/// DTO for updating a SKU. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSku {
    pub drop_id: Option<DbId>,
    pub name: Option<String>,
    pub reference: Option<String>,
    pub family: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub pvp: Option<f64>,
    pub cost: Option<f64>,
    pub margin: Option<f64>,
    pub units: Option<i32>,
    pub channel: Option<String>,
    pub launch_date: Option<NaiveDate>,
}
