//! Handlers for the `/reports` resource.
//!
//! A report freezes the plan overview at creation time so later edits to
//! the plan do not change it.

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::report::{CreateReport, Report, REPORT_TYPE_OVERVIEW};
use atelier_db::repositories::ReportRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::collection_plan::load_overview;
use crate::handlers::{owned_plan, to_json_value};
use crate::middleware::auth::AuthUser;
use crate::query::PlanScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub collection_plan_id: DbId,
    /// Defaults to `"<plan name> overview"`.
    pub title: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Report",
        id,
    })
}

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    let plan = owned_plan(&state, &user, input.collection_plan_id).await?;
    let overview = load_overview(&state, &plan).await?;

    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} overview", plan.name));

    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            collection_plan_id: plan.id,
            owner_id: user.user_id,
            title,
            report_type: REPORT_TYPE_OVERVIEW.to_string(),
            content: to_json_value(&overview)?,
        },
    )
    .await?;

    tracing::info!(report_id = report.id, plan_id = plan.id, "Report created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/reports?collection_plan_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PlanScopeParams>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let reports =
        ReportRepo::list_for_owner(&state.pool, user.user_id, params.collection_plan_id).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = ReportRepo::find_by_id_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/reports/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ReportRepo::delete(&state.pool, id, user.user_id).await? {
        tracing::info!(report_id = id, "Report deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
