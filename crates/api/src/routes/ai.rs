use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// GET    /market-trends      -> market_trends
/// POST   /propose-comments   -> propose_comments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/market-trends", get(ai::market_trends))
        .route("/propose-comments", post(ai::propose_comments))
}
