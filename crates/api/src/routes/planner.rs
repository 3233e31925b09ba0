use axum::routing::post;
use axum::Router;

use crate::handlers::planner;
use crate::state::AppState;

/// Routes mounted at `/planner`.
///
/// ```text
/// POST   /create   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(planner::create))
}
