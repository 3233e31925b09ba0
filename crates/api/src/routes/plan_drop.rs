//! Route definitions for the `/drops` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::plan_drop;
use crate::state::AppState;

/// Routes mounted at `/drops`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plan_drop::list).post(plan_drop::create))
        .route(
            "/{id}",
            get(plan_drop::get_by_id)
                .put(plan_drop::update)
                .delete(plan_drop::delete),
        )
}
