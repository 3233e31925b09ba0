//! Handlers for the `/collection-plans` resource and the plan overview.

use atelier_core::error::CoreError;
use atelier_core::overview::{
    build_overview, AdvisorEntry, DropFacts, OverviewInput, PlanOverview, SkuFacts, TechPackFacts,
};
use atelier_core::planning::{validate_plan_name, validate_setup_data, PlanStatus, SetupData};
use atelier_core::types::DbId;
use atelier_db::models::collection_plan::{
    CollectionPlan, CreateCollectionPlan, UpdateCollectionPlan,
};
use atelier_db::repositories::{
    AiRecommendationRepo, CollectionPlanRepo, CommercialActionRepo, PlanDropRepo, SkuRepo,
    TechPackRepo,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{owned_plan, to_json_value};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /collection-plans` and `POST /planner/create`.
#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub setup_data: Option<serde_json::Value>,
}

/// Body of `POST /collection-plans/{id}/save`.
#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub setup_data: serde_json::Value,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPlansParams {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Parse and validate a setup-data payload, returning its normalized JSON.
fn checked_setup_data(value: serde_json::Value) -> AppResult<serde_json::Value> {
    let setup = SetupData::parse(value)?;
    validate_setup_data(&setup)?;
    to_json_value(&setup)
}

/// Validate an optional status string.
fn checked_status(status: Option<&str>) -> AppResult<Option<String>> {
    status
        .map(|s| PlanStatus::from_str_value(s).map(|st| st.as_str().to_string()))
        .transpose()
        .map_err(AppError::from)
}

/// Validate and insert a plan owned by `user`.
pub(crate) async fn insert_plan(
    state: &AppState,
    user: &AuthUser,
    input: CreatePlanRequest,
) -> AppResult<CollectionPlan> {
    validate_plan_name(&input.name)?;
    let status = checked_status(input.status.as_deref())?;
    let setup_data = match input.setup_data {
        Some(value) => checked_setup_data(value)?,
        None => to_json_value(&SetupData::default())?,
    };

    let plan = CollectionPlanRepo::create(
        &state.pool,
        &CreateCollectionPlan {
            owner_id: user.user_id,
            name: input.name.trim().to_string(),
            season: input.season,
            year: input.year,
            location: input.location,
            status,
            setup_data,
        },
    )
    .await?;

    tracing::info!(plan_id = plan.id, owner_id = %user.user_id, "Collection plan created");
    Ok(plan)
}

/// Gather everything attached to a plan and run the overview aggregation.
pub(crate) async fn load_overview(
    state: &AppState,
    plan: &CollectionPlan,
) -> AppResult<PlanOverview> {
    let skus = SkuRepo::list(&state.pool, Some(plan.id)).await?;
    let drops = PlanDropRepo::list(&state.pool, Some(plan.id)).await?;
    let tech_packs = TechPackRepo::list(&state.pool, Some(plan.id)).await?;
    let action_count = CommercialActionRepo::count_for_plan(&state.pool, plan.id).await?;
    let advisor = AiRecommendationRepo::latest_for_plan(&state.pool, plan.id).await?;

    let input = OverviewInput {
        setup: SetupData::from_value(&plan.setup_data),
        skus: skus
            .into_iter()
            .map(|s| SkuFacts {
                id: s.id,
                family: s.family,
                pvp: s.pvp,
                cost: s.cost,
                margin: s.margin,
                units: s.units,
                drop_id: s.drop_id,
                launch_date: s.launch_date,
            })
            .collect(),
        drops: drops
            .into_iter()
            .map(|d| DropFacts {
                id: d.id,
                name: d.name,
                launch_date: d.launch_date,
            })
            .collect(),
        commercial_action_count: usize::try_from(action_count).unwrap_or(0),
        tech_packs: tech_packs
            .into_iter()
            .map(|t| TechPackFacts {
                id: t.id,
                sku_id: t.sku_id,
            })
            .collect(),
        advisor: advisor
            .into_iter()
            .map(|r| AdvisorEntry {
                kind: r.kind,
                created_at: r.created_at,
                content: r.content,
            })
            .collect(),
    };

    Ok(build_overview(input))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/collection-plans
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreatePlanRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CollectionPlan>>)> {
    let plan = insert_plan(&state, &user, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// GET /api/collection-plans?status=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListPlansParams>,
) -> AppResult<Json<DataResponse<Vec<CollectionPlan>>>> {
    let status = checked_status(params.status.as_deref())?;
    let plans =
        CollectionPlanRepo::list_for_owner(&state.pool, user.user_id, status.as_deref()).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/collection-plans/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CollectionPlan>>> {
    let plan = owned_plan(&state, &user, id).await?;
    Ok(Json(DataResponse { data: plan }))
}

/// PUT /api/collection-plans/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<UpdateCollectionPlan>,
) -> AppResult<Json<DataResponse<CollectionPlan>>> {
    if let Some(name) = &input.name {
        validate_plan_name(name)?;
        input.name = Some(name.trim().to_string());
    }
    input.status = checked_status(input.status.as_deref())?;

    let plan = CollectionPlanRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CollectionPlan",
            id,
        }))?;

    tracing::info!(plan_id = id, "Collection plan updated");
    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/collection-plans/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CollectionPlanRepo::delete(&state.pool, id, user.user_id).await?;
    if deleted {
        tracing::info!(plan_id = id, "Collection plan deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "CollectionPlan",
            id,
        }))
    }
}

/// POST /api/collection-plans/{id}/save
///
/// Replaces the setup data and optionally renames the plan or changes its
/// status. Last write wins.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<SavePlanRequest>,
) -> AppResult<Json<DataResponse<CollectionPlan>>> {
    let setup_data = checked_setup_data(input.setup_data)?;
    if let Some(name) = &input.name {
        validate_plan_name(name)?;
    }
    let status = checked_status(input.status.as_deref())?;

    owned_plan(&state, &user, id).await?;

    let plan = CollectionPlanRepo::save_setup_data(
        &state.pool,
        id,
        user.user_id,
        &setup_data,
        input.name.as_deref().map(str::trim),
        status.as_deref(),
    )
    .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CollectionPlan",
            id,
        }))?;

    tracing::info!(plan_id = id, "Collection plan setup saved");
    Ok(Json(DataResponse { data: plan }))
}

/// GET /api/collection-plans/{id}/overview
pub async fn overview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PlanOverview>>> {
    let plan = owned_plan(&state, &user, id).await?;
    let overview = load_overview(&state, &plan).await?;
    Ok(Json(DataResponse { data: overview }))
}
