//! Handlers for the `/signals` resource (social-listening trend metrics).

use atelier_core::error::CoreError;
use atelier_core::scheduling::validate_date_range;
use atelier_db::models::signal::{CreateSignal, KeywordTotal, Signal, SignalFilter};
use atelier_db::repositories::SignalRepo;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::require_text;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default look-back for `GET /signals/top`.
const DEFAULT_TOP_DAYS: i64 = 30;
/// Longest look-back accepted by `GET /signals/top`.
const MAX_TOP_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct TopKeywordsParams {
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /api/signals
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    AppJson(mut input): AppJson<CreateSignal>,
) -> AppResult<(StatusCode, Json<DataResponse<Signal>>)> {
    require_text("source", &input.source)?;
    require_text("keyword", &input.keyword)?;
    if input.mention_count < 0 || input.engagement < 0 {
        return Err(CoreError::Validation(
            "mention_count and engagement must be >= 0".into(),
        )
        .into());
    }
    validate_date_range(input.period_start, Some(input.period_end))?;
    input.keyword = input.keyword.trim().trim_start_matches('#').to_lowercase();

    let signal = SignalRepo::create(&state.pool, &input).await?;
    tracing::info!(signal_id = signal.id, keyword = %signal.keyword, "Signal created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: signal })))
}

/// GET /api/signals?source=&keyword=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<SignalFilter>,
) -> AppResult<Json<DataResponse<Vec<Signal>>>> {
    let signals = SignalRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: signals }))
}

/// GET /api/signals/top?days=&limit=
pub async fn top_keywords(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<TopKeywordsParams>,
) -> AppResult<Json<DataResponse<Vec<KeywordTotal>>>> {
    let days = params.days.unwrap_or(DEFAULT_TOP_DAYS).clamp(1, MAX_TOP_DAYS);
    let since = (Utc::now() - Duration::days(days)).date_naive();
    let keywords = SignalRepo::top_keywords(&state.pool, since, params.limit).await?;
    Ok(Json(DataResponse { data: keywords }))
}
