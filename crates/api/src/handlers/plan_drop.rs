//! Handlers for the `/drops` resource.

use atelier_core::error::CoreError;
use atelier_core::scheduling::{validate_channels, validate_date_range};
use atelier_core::types::DbId;
use atelier_db::models::plan_drop::{CreatePlanDrop, PlanDrop, UpdatePlanDrop};
use atelier_db::repositories::PlanDropRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{ensure_child_owned, owned_plan, require_plan_scope, require_text};
use crate::middleware::auth::AuthUser;
use crate::query::PlanScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Drop", id })
}

async fn owned_drop(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<PlanDrop> {
    let drop = PlanDropRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_child_owned(state, user, drop.collection_plan_id, "Drop", id).await?;
    Ok(drop)
}

/// POST /api/drops
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreatePlanDrop>,
) -> AppResult<(StatusCode, Json<DataResponse<PlanDrop>>)> {
    require_text("name", &input.name)?;
    validate_date_range(input.launch_date, input.end_date)?;
    if let Some(channels) = &input.channels {
        validate_channels(channels)?;
    }
    owned_plan(&state, &user, input.collection_plan_id).await?;

    let drop = PlanDropRepo::create(&state.pool, &input).await?;
    tracing::info!(drop_id = drop.id, plan_id = drop.collection_plan_id, "Drop created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: drop })))
}

/// GET /api/drops?collection_plan_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PlanScopeParams>,
) -> AppResult<Json<DataResponse<Vec<PlanDrop>>>> {
    let plan_id = require_plan_scope(&state, &user, params.collection_plan_id).await?;
    let drops = PlanDropRepo::list(&state.pool, Some(plan_id)).await?;
    Ok(Json(DataResponse { data: drops }))
}

/// GET /api/drops/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PlanDrop>>> {
    let drop = owned_drop(&state, &user, id).await?;
    Ok(Json(DataResponse { data: drop }))
}

/// PUT /api/drops/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdatePlanDrop>,
) -> AppResult<Json<DataResponse<PlanDrop>>> {
    let current = owned_drop(&state, &user, id).await?;

    if let Some(name) = &input.name {
        require_text("name", name)?;
    }
    validate_date_range(
        input.launch_date.unwrap_or(current.launch_date),
        input.end_date.or(current.end_date),
    )?;
    if let Some(channels) = &input.channels {
        validate_channels(channels)?;
    }

    let drop = PlanDropRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(drop_id = id, "Drop updated");
    Ok(Json(DataResponse { data: drop }))
}

/// DELETE /api/drops/{id}
///
/// SKUs assigned to the drop are kept and become unassigned.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_drop(&state, &user, id).await?;
    if PlanDropRepo::delete(&state.pool, id).await? {
        tracing::info!(drop_id = id, "Drop deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
