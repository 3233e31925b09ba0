//! Handlers for the `/commercial-actions` resource.

use atelier_core::error::CoreError;
use atelier_core::scheduling::{validate_channels, validate_date_range, CommercialActionType};
use atelier_core::types::DbId;
use atelier_db::models::commercial_action::{
    CommercialAction, CreateCommercialAction, UpdateCommercialAction,
};
use atelier_db::repositories::CommercialActionRepo;
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
    AppError::Core(CoreError::NotFound {
        entity: "CommercialAction",
        id,
    })
}

async fn owned_action(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<CommercialAction> {
    let action = CommercialActionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_child_owned(state, user, action.collection_plan_id, "CommercialAction", id).await?;
    Ok(action)
}

/// Normalize an optional action type to its canonical spelling.
fn checked_action_type(action_type: Option<&str>) -> AppResult<Option<String>> {
    Ok(action_type
        .map(CommercialActionType::from_str_value)
        .transpose()?
        .map(|t| t.as_str().to_string()))
}

/// POST /api/commercial-actions
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(mut input): AppJson<CreateCommercialAction>,
) -> AppResult<(StatusCode, Json<DataResponse<CommercialAction>>)> {
    require_text("name", &input.name)?;
    input.action_type = checked_action_type(input.action_type.as_deref())?;
    validate_date_range(input.start_date, input.end_date)?;
    if let Some(channels) = &input.channels {
        validate_channels(channels)?;
    }
    owned_plan(&state, &user, input.collection_plan_id).await?;

    let action = CommercialActionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        action_id = action.id,
        plan_id = action.collection_plan_id,
        action_type = %action.action_type,
        "Commercial action created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

/// GET /api/commercial-actions?collection_plan_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PlanScopeParams>,
) -> AppResult<Json<DataResponse<Vec<CommercialAction>>>> {
    let plan_id = require_plan_scope(&state, &user, params.collection_plan_id).await?;
    let actions = CommercialActionRepo::list(&state.pool, Some(plan_id)).await?;
    Ok(Json(DataResponse { data: actions }))
}

/// GET /api/commercial-actions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CommercialAction>>> {
    let action = owned_action(&state, &user, id).await?;
    Ok(Json(DataResponse { data: action }))
}

/// PUT /api/commercial-actions/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<UpdateCommercialAction>,
) -> AppResult<Json<DataResponse<CommercialAction>>> {
    let current = owned_action(&state, &user, id).await?;

    if let Some(name) = &input.name {
        require_text("name", name)?;
    }
    input.action_type = checked_action_type(input.action_type.as_deref())?;
    validate_date_range(
        input.start_date.unwrap_or(current.start_date),
        input.end_date.or(current.end_date),
    )?;
    if let Some(channels) = &input.channels {
        validate_channels(channels)?;
    }

    let action = CommercialActionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(action_id = id, "Commercial action updated");
    Ok(Json(DataResponse { data: action }))
}

/// DELETE /api/commercial-actions/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_action(&state, &user, id).await?;
    if CommercialActionRepo::delete(&state.pool, id).await? {
        tracing::info!(action_id = id, "Commercial action deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
