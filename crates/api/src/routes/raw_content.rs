use axum::routing::get;
use axum::Router;

use crate::handlers::raw_content;
use crate::state::AppState;

/// Routes mounted at `/raw-content`.
///
/// ```text
/// GET    /   -> list     (user token)
/// POST   /   -> ingest   (cron secret)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(raw_content::list).post(raw_content::ingest))
}
