//! Social-trend signal model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `signals` table: mentions of one keyword on one source
/// over one period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Signal {
    pub id: DbId,
    pub source: String,
    pub keyword: String,
    pub mention_count: i64,
    pub engagement: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or upserting a signal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSignal {
    pub source: String,
    pub keyword: String,
    pub mention_count: i64,
    #[serde(default)]
    pub engagement: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Filters for listing signals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalFilter {
    pub source: Option<String>,
    pub keyword: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Keyword totals across all sources since a date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KeywordTotal {
    pub keyword: String,
    pub mention_count: i64,
    pub engagement: i64,
}
