use axum::routing::get;
use axum::Router;

use crate::handlers::signal;
use crate::state::AppState;

/// Routes mounted at `/signals`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /top   -> top_keywords
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(signal::list).post(signal::create))
        .route("/top", get(signal::top_keywords))
}
