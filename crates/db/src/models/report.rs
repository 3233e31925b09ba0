//! Report snapshot model and DTOs.

use atelier_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

pub const REPORT_TYPE_OVERVIEW: &str = "overview";

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub owner_id: UserId,
    pub title: String,
    pub report_type: String,
    /// Snapshot of the plan overview at generation time.
    pub content: serde_json::Value,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateReport {
    pub collection_plan_id: DbId,
    pub owner_id: UserId,
    pub title: String,
    pub report_type: String,
    pub content: serde_json::Value,
}
