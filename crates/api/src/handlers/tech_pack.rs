//! Handlers for the `/tech-packs` resource (Creative Space).

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::tech_pack::{CreateTechPack, TechPack, UpdateTechPack};
use atelier_db::repositories::{SkuRepo, TechPackRepo};
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
        entity: "TechPack",
        id,
    })
}

async fn owned_tech_pack(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<TechPack> {
    let pack = TechPackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_child_owned(state, user, pack.collection_plan_id, "TechPack", id).await?;
    Ok(pack)
}

/// A linked SKU must belong to the same plan.
async fn check_sku(state: &AppState, plan_id: DbId, sku_id: Option<DbId>) -> AppResult<()> {
    let Some(sku_id) = sku_id else {
        return Ok(());
    };
    match SkuRepo::find_by_id(&state.pool, sku_id).await? {
        Some(s) if s.collection_plan_id == plan_id => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "SKU {sku_id} does not belong to collection plan {plan_id}"
        )))),
    }
}

/// POST /api/tech-packs
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateTechPack>,
) -> AppResult<(StatusCode, Json<DataResponse<TechPack>>)> {
    require_text("name", &input.name)?;
    owned_plan(&state, &user, input.collection_plan_id).await?;
    check_sku(&state, input.collection_plan_id, input.sku_id).await?;

    let pack = TechPackRepo::create(&state.pool, &input).await?;
    tracing::info!(tech_pack_id = pack.id, plan_id = pack.collection_plan_id, "Tech pack created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: pack })))
}

/// GET /api/tech-packs?collection_plan_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PlanScopeParams>,
) -> AppResult<Json<DataResponse<Vec<TechPack>>>> {
    let plan_id = require_plan_scope(&state, &user, params.collection_plan_id).await?;
    let packs = TechPackRepo::list(&state.pool, Some(plan_id)).await?;
    Ok(Json(DataResponse { data: packs }))
}

/// GET /api/tech-packs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TechPack>>> {
    let pack = owned_tech_pack(&state, &user, id).await?;
    Ok(Json(DataResponse { data: pack }))
}

/// PUT /api/tech-packs/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTechPack>,
) -> AppResult<Json<DataResponse<TechPack>>> {
    let current = owned_tech_pack(&state, &user, id).await?;
    if let Some(name) = &input.name {
        require_text("name", name)?;
    }
    check_sku(&state, current.collection_plan_id, input.sku_id).await?;

    let pack = TechPackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(tech_pack_id = id, "Tech pack updated");
    Ok(Json(DataResponse { data: pack }))
}

/// DELETE /api/tech-packs/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_tech_pack(&state, &user, id).await?;
    if TechPackRepo::delete(&state.pool, id).await? {
        tracing::info!(tech_pack_id = id, "Tech pack deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
