//! Stored AI Advisor output.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub const KIND_MARKET_TRENDS: &str = "market_trends";

pub const PROVIDER_GEMINI: &str = "gemini";

/// A row from the `ai_recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiRecommendation {
    pub id: DbId,
    pub collection_plan_id: DbId,
    pub kind: String,
    pub provider: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAiRecommendation {
    pub collection_plan_id: DbId,
    pub kind: String,
    pub provider: String,
    pub content: serde_json::Value,
}
