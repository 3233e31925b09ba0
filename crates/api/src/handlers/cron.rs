//! Scheduled jobs, triggered by an external scheduler with the cron secret.
//!
//! Each step is an independent endpoint. `run-all` calls them one after
//! another over HTTP so each step gets its own request timeout, and reports
//! per-step outcomes without rolling anything back.

use std::collections::HashMap;
use std::time::Instant;

use atelier_ai::prompts::MarketTrendsQuery;
use atelier_core::cron::{
    clamp_window_days, RunSummary, StepOutcome, CRON_STEPS, PROCESS_BATCH_SIZE,
};
use atelier_core::hashtags::{aggregate, extract_hashtags};
use atelier_core::planning::{SetupData, STATUS_ACTIVE};
use atelier_db::models::raw_content::RawContent;
use atelier_db::models::signal::CreateSignal;
use atelier_db::repositories::{CollectionPlanRepo, RawContentRepo, SignalRepo};
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::ai::{fetch_market_trends, store_market_trends};
use crate::middleware::cron_auth::CronAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest error body kept in a step outcome.
const MAX_STEP_ERROR_LEN: usize = 500;

#[derive(Debug, Serialize)]
pub struct ProcessContentResult {
    pub processed: usize,
    pub hashtags_found: usize,
}

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AggregateResult {
    pub window_days: i64,
    pub contents: usize,
    pub signals_upserted: usize,
}

#[derive(Debug, Serialize)]
pub struct MarketTrendsResult {
    pub plans: usize,
    pub refreshed: usize,
    pub failed: usize,
}

/// GET|POST /api/cron/process-content
///
/// Extracts hashtags from the oldest unprocessed posts.
pub async fn process_content(
    State(state): State<AppState>,
    _cron: CronAuth,
) -> AppResult<Json<DataResponse<ProcessContentResult>>> {
    let batch = RawContentRepo::list_unprocessed(&state.pool, PROCESS_BATCH_SIZE).await?;

    let mut hashtags_found = 0;
    for content in &batch {
        let hashtags = extract_hashtags(&content.text);
        hashtags_found += hashtags.len();
        RawContentRepo::mark_processed(&state.pool, content.id, &hashtags).await?;
    }

    tracing::info!(processed = batch.len(), hashtags_found, "Raw content processed");
    Ok(Json(DataResponse {
        data: ProcessContentResult {
            processed: batch.len(),
            hashtags_found,
        },
    }))
}

/// GET|POST /api/cron/aggregate-signals?days=
///
/// Rolls processed posts from the last `days` into one signal per source
/// and keyword. Re-running on the same day overwrites that day's rows.
pub async fn aggregate_signals(
    State(state): State<AppState>,
    _cron: CronAuth,
    Query(params): Query<AggregateParams>,
) -> AppResult<Json<DataResponse<AggregateResult>>> {
    let window_days = clamp_window_days(params.days);
    let now = Utc::now();
    let since = now - Duration::days(window_days);

    let contents = RawContentRepo::list_processed_since(&state.pool, since).await?;

    let mut by_source: HashMap<&str, Vec<&RawContent>> = HashMap::new();
    for content in &contents {
        by_source.entry(content.source.as_str()).or_default().push(content);
    }

    let mut signals_upserted = 0;
    for (source, items) in by_source {
        let counts = aggregate(
            items
                .iter()
                .map(|c| (c.hashtags.as_slice(), c.engagement)),
        );
        for count in counts {
            SignalRepo::upsert(
                &state.pool,
                &CreateSignal {
                    source: source.to_string(),
                    keyword: count.keyword,
                    mention_count: count.mentions,
                    engagement: count.engagement,
                    period_start: since.date_naive(),
                    period_end: now.date_naive(),
                },
            )
            .await?;
            signals_upserted += 1;
        }
    }

    tracing::info!(
        window_days,
        contents = contents.len(),
        signals_upserted,
        "Signals aggregated"
    );
    Ok(Json(DataResponse {
        data: AggregateResult {
            window_days,
            contents: contents.len(),
            signals_upserted,
        },
    }))
}

/// GET|POST /api/cron/market-trends
///
/// Refreshes the Gemini market-trend briefing of every active plan. A
/// failing plan is logged and skipped.
pub async fn market_trends(
    State(state): State<AppState>,
    _cron: CronAuth,
) -> AppResult<Json<DataResponse<MarketTrendsResult>>> {
    let gemini = state.gemini()?;
    let plans = CollectionPlanRepo::list_by_status(&state.pool, STATUS_ACTIVE).await?;

    let mut refreshed = 0;
    let mut failed = 0;
    for plan in &plans {
        let setup = SetupData::from_value(&plan.setup_data);
        let query = MarketTrendsQuery {
            season: plan.season.clone(),
            location: plan.location.clone(),
            categories: setup
                .product_families
                .into_iter()
                .map(|f| f.family)
                .collect(),
        };

        let result = match fetch_market_trends(gemini, &query).await {
            Ok(trends) => store_market_trends(&state, plan.id, trends).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => refreshed += 1,
            Err(e) => {
                tracing::error!(plan_id = plan.id, error = %e, "Market trend refresh failed");
                failed += 1;
            }
        }
    }

    tracing::info!(plans = plans.len(), refreshed, failed, "Market trends refreshed");
    Ok(Json(DataResponse {
        data: MarketTrendsResult {
            plans: plans.len(),
            refreshed,
            failed,
        },
    }))
}

/// GET|POST /api/cron/run-all
///
/// Runs every step in order. Always answers 200; check `success` and the
/// per-step outcomes.
pub async fn run_all(
    State(state): State<AppState>,
    _cron: CronAuth,
) -> AppResult<Json<DataResponse<RunSummary>>> {
    let secret = state
        .config
        .cron_secret
        .as_deref()
        .ok_or_else(|| AppError::InternalError("CRON_SECRET missing after auth".into()))?;

    let mut steps = Vec::with_capacity(CRON_STEPS.len());
    for step in CRON_STEPS {
        let outcome = run_step(&state, step, secret).await;
        if outcome.success {
            tracing::info!(step, duration_ms = outcome.duration_ms, "Cron step succeeded");
        } else {
            tracing::error!(
                step,
                status = ?outcome.status,
                error = ?outcome.error,
                "Cron step failed"
            );
        }
        steps.push(outcome);
    }

    let summary = RunSummary::from_steps(steps);
    tracing::info!(success = summary.success, "Cron run finished");
    Ok(Json(DataResponse { data: summary }))
}

async fn run_step(state: &AppState, step: &str, secret: &str) -> StepOutcome {
    let url = format!("{}/api/cron/{step}", state.config.cron_base_url);
    let started = Instant::now();
    let result = state.http.post(&url).bearer_auth(secret).send().await;
    let elapsed = || u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(response) if response.status().is_success() => StepOutcome {
            step: step.to_string(),
            success: true,
            status: Some(response.status().as_u16()),
            error: None,
            duration_ms: elapsed(),
        },
        Ok(response) => {
            let status = response.status().as_u16();
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_STEP_ERROR_LEN {
                let cut = (0..=MAX_STEP_ERROR_LEN)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            StepOutcome {
                step: step.to_string(),
                success: false,
                status: Some(status),
                error: Some(body),
                duration_ms: elapsed(),
            }
        }
        Err(e) => StepOutcome {
            step: step.to_string(),
            success: false,
            status: None,
            error: Some(e.to_string()),
            duration_ms: elapsed(),
        },
    }
}
