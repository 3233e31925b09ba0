//! Shared query parameter types for API handlers.

use atelier_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?collection_plan_id=` scope for child-entity lists.
#[derive(Debug, Deserialize)]
pub struct PlanScopeParams {
    pub collection_plan_id: Option<DbId>,
}
