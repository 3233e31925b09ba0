//! Planning wizard submission.

use atelier_core::planning::STATUS_DRAFT;
use atelier_db::models::collection_plan::CollectionPlan;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::collection_plan::{insert_plan, CreatePlanRequest};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Wizard output. Plans created here always start as drafts.
#[derive(Debug, Deserialize)]
pub struct PlannerRequest {
    pub name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub setup_data: Option<serde_json::Value>,
}

/// POST /api/planner/create
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<PlannerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CollectionPlan>>)> {
    let plan = insert_plan(
        &state,
        &user,
        CreatePlanRequest {
            name: input.name,
            season: input.season,
            year: input.year,
            location: input.location,
            status: Some(STATUS_DRAFT.to_string()),
            setup_data: input.setup_data,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}
