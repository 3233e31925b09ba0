//! Handlers for the `/skus` resource.

use atelier_core::error::CoreError;
use atelier_core::pricing::{margin_percent, validate_channel, validate_sku_prices, validate_units};
use atelier_core::types::DbId;
use atelier_db::models::sku::{CreateSku, Sku, UpdateSku};
use atelier_db::repositories::{PlanDropRepo, SkuRepo};
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
    AppError::Core(CoreError::NotFound { entity: "Sku", id })
}

/// Load a SKU whose plan belongs to the caller.
async fn owned_sku(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Sku> {
    let sku = SkuRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_child_owned(state, user, sku.collection_plan_id, "Sku", id).await?;
    Ok(sku)
}

/// A drop referenced by a SKU must belong to the same plan.
async fn check_drop(state: &AppState, plan_id: DbId, drop_id: Option<DbId>) -> AppResult<()> {
    let Some(drop_id) = drop_id else {
        return Ok(());
    };
    match PlanDropRepo::find_by_id(&state.pool, drop_id).await? {
        Some(d) if d.collection_plan_id == plan_id => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "Drop {drop_id} does not belong to collection plan {plan_id}"
        )))),
    }
}

/// POST /api/skus
///
/// `margin` is derived from `pvp` and `cost` when omitted.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(mut input): AppJson<CreateSku>,
) -> AppResult<(StatusCode, Json<DataResponse<Sku>>)> {
    require_text("name", &input.name)?;
    require_text("family", &input.family)?;
    validate_sku_prices(input.pvp, input.cost)?;
    validate_units(input.units)?;
    validate_channel(input.channel.as_deref())?;

    owned_plan(&state, &user, input.collection_plan_id).await?;
    check_drop(&state, input.collection_plan_id, input.drop_id).await?;

    if input.margin.is_none() {
        input.margin = margin_percent(input.pvp, input.cost);
    }

    let sku = SkuRepo::create(&state.pool, &input).await?;
    tracing::info!(sku_id = sku.id, plan_id = sku.collection_plan_id, "SKU created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: sku })))
}

/// GET /api/skus?collection_plan_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PlanScopeParams>,
) -> AppResult<Json<DataResponse<Vec<Sku>>>> {
    let plan_id = require_plan_scope(&state, &user, params.collection_plan_id).await?;
    let skus = SkuRepo::list(&state.pool, Some(plan_id)).await?;
    Ok(Json(DataResponse { data: skus }))
}

/// GET /api/skus/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Sku>>> {
    let sku = owned_sku(&state, &user, id).await?;
    Ok(Json(DataResponse { data: sku }))
}

/// PUT /api/skus/{id}
///
/// When `pvp` or `cost` changes and no explicit `margin` is sent, the margin
/// is recomputed from the resulting prices.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<UpdateSku>,
) -> AppResult<Json<DataResponse<Sku>>> {
    let current = owned_sku(&state, &user, id).await?;

    if let Some(name) = &input.name {
        require_text("name", name)?;
    }
    if let Some(family) = &input.family {
        require_text("family", family)?;
    }
    let pvp = input.pvp.unwrap_or(current.pvp);
    let cost = input.cost.unwrap_or(current.cost);
    validate_sku_prices(pvp, cost)?;
    validate_units(input.units)?;
    validate_channel(input.channel.as_deref())?;
    check_drop(&state, current.collection_plan_id, input.drop_id).await?;

    if input.margin.is_none() && (input.pvp.is_some() || input.cost.is_some()) {
        input.margin = margin_percent(pvp, cost);
    }

    let sku = SkuRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(sku_id = id, "SKU updated");
    Ok(Json(DataResponse { data: sku }))
}

/// DELETE /api/skus/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_sku(&state, &user, id).await?;
    if SkuRepo::delete(&state.pool, id).await? {
        tracing::info!(sku_id = id, "SKU deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
