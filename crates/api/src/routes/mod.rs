pub mod ai;
pub mod collection_plan;
pub mod commercial_action;
pub mod cron;
pub mod health;
pub mod pinterest;
pub mod plan_drop;
pub mod planner;
pub mod raw_content;
pub mod report;
pub mod signal;
pub mod sku;
pub mod tech_pack;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /collection-plans                        list, create (auth)
/// /collection-plans/{id}                   get, update, delete
/// /collection-plans/{id}/save              save setup data (POST)
/// /collection-plans/{id}/overview          aggregated plan overview (GET)
///
/// /planner/create                          wizard submission (POST)
///
/// /skus                                    list (?collection_plan_id), create
/// /skus/{id}                               get, update, delete
/// /drops                                   list (?collection_plan_id), create
/// /drops/{id}                              get, update, delete
/// /commercial-actions                      list (?collection_plan_id), create
/// /commercial-actions/{id}                 get, update, delete
/// /tech-packs                              list (?collection_plan_id), create
/// /tech-packs/{id}                         get, update, delete
///
/// /signals                                 list (?source, keyword, limit, offset), create
/// /signals/top                             top keywords (?days, limit)
///
/// /raw-content                             list (auth), ingest (POST, cron secret)
///
/// /reports                                 list (?collection_plan_id), create
/// /reports/{id}                            get, delete
///
/// /ai/market-trends                        Gemini trend briefing (GET)
/// /ai/propose-comments                     Claude reply proposals (POST)
///
/// /pinterest/auth                          redirect to consent screen (GET)
/// /pinterest/callback                      OAuth redirect target (GET)
/// /pinterest/signout                       clear token cookie (POST)
/// /pinterest/boards                        list boards (GET, cookie)
/// /pinterest/boards/{id}/pins              list pins (GET, cookie)
///
/// /cron/process-content                    extract hashtags (GET, POST; cron secret)
/// /cron/aggregate-signals                  roll up signals (?days)
/// /cron/market-trends                      refresh active plans
/// /cron/run-all                            run every step in order (mounted in app.rs)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/collection-plans", collection_plan::router())
        .nest("/planner", planner::router())
        .nest("/skus", sku::router())
        .nest("/drops", plan_drop::router())
        .nest("/commercial-actions", commercial_action::router())
        .nest("/tech-packs", tech_pack::router())
        .nest("/signals", signal::router())
        .nest("/raw-content", raw_content::router())
        .nest("/reports", report::router())
        .nest("/ai", ai::router())
        .nest("/pinterest", pinterest::router())
        .nest("/cron", cron::router())
}
