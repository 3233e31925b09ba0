pub mod ai;
pub mod collection_plan;
pub mod commercial_action;
pub mod cron;
pub mod pinterest;
pub mod plan_drop;
pub mod planner;
pub mod raw_content;
pub mod report;
pub mod signal;
pub mod sku;
pub mod tech_pack;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::collection_plan::CollectionPlan;
use atelier_db::repositories::CollectionPlanRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load a plan the caller owns. Plans owned by someone else are reported
/// as missing.
pub(crate) async fn owned_plan(
    state: &AppState,
    user: &AuthUser,
    plan_id: DbId,
) -> AppResult<CollectionPlan> {
    CollectionPlanRepo::find_by_id_for_owner(&state.pool, plan_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CollectionPlan",
            id: plan_id,
        }))
}

/// Check that the plan a child entity hangs off belongs to the caller,
/// reporting the child itself as missing otherwise.
pub(crate) async fn ensure_child_owned(
    state: &AppState,
    user: &AuthUser,
    plan_id: DbId,
    entity: &'static str,
    id: DbId,
) -> AppResult<()> {
    match CollectionPlanRepo::find_by_id_for_owner(&state.pool, plan_id, user.user_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Core(CoreError::NotFound { entity, id })),
    }
}

/// Reject blank required text fields.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Resolve the mandatory `?collection_plan_id=` of a child-entity list and
/// check the caller owns that plan.
pub(crate) async fn require_plan_scope(
    state: &AppState,
    user: &AuthUser,
    collection_plan_id: Option<DbId>,
) -> AppResult<DbId> {
    let plan_id = collection_plan_id.ok_or_else(|| {
        AppError::BadRequest("collection_plan_id query parameter is required".into())
    })?;
    owned_plan(state, user, plan_id).await?;
    Ok(plan_id)
}

/// Serialize a value into a JSONB payload.
pub(crate) fn to_json_value<T: serde::Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::InternalError(e.to_string()))
}
