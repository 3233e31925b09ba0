//! Route definitions for the `/commercial-actions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::commercial_action;
use crate::state::AppState;

/// Routes mounted at `/commercial-actions`.
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
        .route("/", get(commercial_action::list).post(commercial_action::create))
        .route(
            "/{id}",
            get(commercial_action::get_by_id)
                .put(commercial_action::update)
                .delete(commercial_action::delete),
        )
}
