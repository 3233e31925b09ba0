use axum::routing::get;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// Routes mounted at `/cron`. Every route accepts GET and POST so both
/// hosted schedulers and plain `curl -X POST` can trigger them.
///
/// ```text
/// /process-content     -> process_content
/// /aggregate-signals   -> aggregate_signals
/// /market-trends       -> market_trends
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/process-content",
            get(cron::process_content).post(cron::process_content),
        )
        .route(
            "/aggregate-signals",
            get(cron::aggregate_signals).post(cron::aggregate_signals),
        )
        .route(
            "/market-trends",
            get(cron::market_trends).post(cron::market_trends),
        )
}

/// The `/run-all` orchestrator, mounted outside the global request timeout.
/// Each step it calls is a separate request bounded on its own.
pub fn orchestrator_router() -> Router<AppState> {
    Router::new().route("/run-all", get(cron::run_all).post(cron::run_all))
}
