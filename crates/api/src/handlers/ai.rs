//! AI Advisor endpoints backed by Gemini and Claude.

use atelier_ai::gemini::GeminiClient;
use atelier_ai::prompts::{self, CommentRequest, MarketTrendsQuery};
use atelier_core::error::CoreError;
use atelier_core::llm_json::{extract_json, require_array_fields};
use atelier_core::types::DbId;
use atelier_db::models::ai_recommendation::{
    CreateAiRecommendation, KIND_MARKET_TRENDS, PROVIDER_GEMINI,
};
use atelier_db::repositories::AiRecommendationRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{owned_plan, require_text};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

pub const DEFAULT_COMMENT_COUNT: u8 = 3;
pub const MAX_COMMENT_COUNT: u8 = 10;

/// Token budget for a comment proposal.
const COMMENTS_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
pub struct MarketTrendsParams {
    pub season: Option<String>,
    pub location: Option<String>,
    /// Comma-separated product categories.
    pub categories: Option<String>,
    /// Store the result as the plan's latest market-trend recommendation.
    pub collection_plan_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct ProposeCommentsRequest {
    pub post_text: String,
    pub brand_voice: Option<String>,
    pub count: Option<u8>,
}

/// Parse model text into JSON carrying the given array fields.
///
/// Unusable model output is an upstream failure, not a client error.
fn parse_model_json(text: &str, required: &[&str]) -> AppResult<Value> {
    let value = extract_json(text).map_err(|e| AppError::Upstream(e.to_string()))?;
    require_array_fields(&value, required).map_err(|e| AppError::Upstream(e.to_string()))?;
    Ok(value)
}

/// Ask Gemini for a market-trend briefing and return the parsed JSON.
pub(crate) async fn fetch_market_trends(
    gemini: &GeminiClient,
    query: &MarketTrendsQuery,
) -> AppResult<Value> {
    let text = gemini.generate(&prompts::market_trends(query)).await?;
    parse_model_json(&text, &["trends"])
}

/// Persist a market-trend briefing for a plan.
pub(crate) async fn store_market_trends(
    state: &AppState,
    plan_id: DbId,
    content: Value,
) -> AppResult<()> {
    let rec = AiRecommendationRepo::create(
        &state.pool,
        &CreateAiRecommendation {
            collection_plan_id: plan_id,
            kind: KIND_MARKET_TRENDS.to_string(),
            provider: PROVIDER_GEMINI.to_string(),
            content,
        },
    )
    .await?;
    tracing::info!(recommendation_id = rec.id, plan_id, "Market trends stored");
    Ok(())
}

/// GET /api/ai/market-trends?season=&location=&categories=&collection_plan_id=
pub async fn market_trends(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MarketTrendsParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let gemini = state.gemini()?;
    if let Some(plan_id) = params.collection_plan_id {
        owned_plan(&state, &user, plan_id).await?;
    }

    let query = MarketTrendsQuery {
        season: params.season.filter(|s| !s.trim().is_empty()),
        location: params.location.filter(|s| !s.trim().is_empty()),
        categories: params
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect(),
    };

    let trends = fetch_market_trends(gemini, &query).await?;
    if let Some(plan_id) = params.collection_plan_id {
        store_market_trends(&state, plan_id, trends.clone()).await?;
    }

    Ok(Json(DataResponse { data: trends }))
}

/// POST /api/ai/propose-comments
pub async fn propose_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    AppJson(input): AppJson<ProposeCommentsRequest>,
) -> AppResult<Json<DataResponse<Value>>> {
    require_text("post_text", &input.post_text)?;
    let count = input.count.unwrap_or(DEFAULT_COMMENT_COUNT);
    if !(1..=MAX_COMMENT_COUNT).contains(&count) {
        return Err(CoreError::Validation(format!(
            "count must be between 1 and {MAX_COMMENT_COUNT}"
        ))
        .into());
    }
    let anthropic = state.anthropic()?;

    let prompt = prompts::propose_comments(&CommentRequest {
        post_text: input.post_text,
        brand_voice: input.brand_voice,
        count,
    });
    let text = anthropic
        .complete(
            Some(prompts::COMMENTS_SYSTEM_PROMPT),
            &prompt,
            COMMENTS_MAX_TOKENS,
        )
        .await?;

    let comments = parse_model_json(&text, &["comments"])?;
    Ok(Json(DataResponse { data: comments }))
}
