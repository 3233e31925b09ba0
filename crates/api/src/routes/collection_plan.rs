//! Route definitions for the `/collection-plans` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::collection_plan;
use crate::state::AppState;

/// Routes mounted at `/collection-plans`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/save       -> save
/// GET    /{id}/overview   -> overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collection_plan::list).post(collection_plan::create),
        )
        .route(
            "/{id}",
            get(collection_plan::get_by_id)
                .put(collection_plan::update)
                .delete(collection_plan::delete),
        )
        .route("/{id}/save", post(collection_plan::save))
        .route("/{id}/overview", get(collection_plan::overview))
}
