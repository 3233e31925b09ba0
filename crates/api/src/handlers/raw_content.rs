//! Ingestion and listing of collected social posts.

use atelier_core::error::CoreError;
use atelier_db::models::raw_content::{NewRawContent, RawContent};
use atelier_db::repositories::RawContentRepo;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::cron_auth::CronAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest batch a collector may push in one request.
pub const MAX_INGEST_BATCH: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub items: Vec<NewRawContent>,
}

#[derive(Debug, Serialize)]
pub struct IngestResult {
    pub received: usize,
    /// Items not already stored under the same `(source, external_id)`.
    pub inserted: u64,
}

fn validate_item(index: usize, item: &NewRawContent) -> Result<(), CoreError> {
    let blank = |v: &str| v.trim().is_empty();
    if blank(&item.source) || blank(&item.external_id) || blank(&item.text) {
        return Err(CoreError::Validation(format!(
            "items[{index}]: source, external_id and text are required"
        )));
    }
    Ok(())
}

/// POST /api/raw-content
///
/// Bulk ingest from collectors; authenticated with the cron secret.
pub async fn ingest(
    State(state): State<AppState>,
    _cron: CronAuth,
    AppJson(input): AppJson<IngestRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IngestResult>>)> {
    if input.items.is_empty() {
        return Err(CoreError::Validation("items must not be empty".into()).into());
    }
    if input.items.len() > MAX_INGEST_BATCH {
        return Err(CoreError::Validation(format!(
            "at most {MAX_INGEST_BATCH} items per request"
        ))
        .into());
    }
    for (index, item) in input.items.iter().enumerate() {
        validate_item(index, item)?;
    }

    let inserted = RawContentRepo::insert_many(&state.pool, &input.items).await?;
    tracing::info!(received = input.items.len(), inserted, "Raw content ingested");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IngestResult {
                received: input.items.len(),
                inserted,
            },
        }),
    ))
}

/// GET /api/raw-content?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<RawContent>>>> {
    let items = RawContentRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: items }))
}
