//! Tech pack (Creative Space sketch + specification) model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tech_packs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechPack {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub sku_id: Option<DbId>,
    pub name: String,
    pub sketch_url: Option<String>,
    pub description: Option<String>,
    /// Free-form construction details (fabric, measurements, trims).
    pub specs: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTechPack {
    pub collection_plan_id: DbId,
    pub sku_id: Option<DbId>,
    pub name: String,
    pub sketch_url: Option<String>,
    pub description: Option<String>,
    pub specs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTechPack {
    pub sku_id: Option<DbId>,
    pub name: Option<String>,
    pub sketch_url: Option<String>,
    pub description: Option<String>,
    pub specs: Option<serde_json::Value>,
}
