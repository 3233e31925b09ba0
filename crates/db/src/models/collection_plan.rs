//! Collection plan entity model and DTOs.

use atelier_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `collection_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionPlan {
    pub id: DbId,
    pub owner_id: UserId,
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub status: String,
    /// Planning-wizard output; see `atelier_core::planning::SetupData`.
    pub setup_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a plan. The owner comes from the authenticated user,
/// never from the request body.
#[derive(Debug, Clone)]
pub struct CreateCollectionPlan {
    pub owner_id: UserId,
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub setup_data: serde_json::Value,
}

/// DTO for updating plan metadata. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCollectionPlan {
    pub name: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub status: Option<String>,
}
