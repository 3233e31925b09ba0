//! Collected social post model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `raw_contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RawContent {
    pub id: DbId,
    pub source: String,
    pub external_id: String,
    pub author: Option<String>,
    pub text: String,
    pub url: Option<String>,
    pub engagement: i64,
    /// Filled in by the `process-content` cron step.
    pub hashtags: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for ingesting a collected post.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRawContent {
    pub source: String,
    pub external_id: String,
    pub author: Option<String>,
    pub text: String,
    pub url: Option<String>,
    #[serde(default)]
    pub engagement: i64,
    pub published_at: Option<Timestamp>,
}
