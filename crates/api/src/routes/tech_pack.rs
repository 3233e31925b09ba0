//! Route definitions for the `/tech-packs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tech_pack;
use crate::state::AppState;

/// Routes mounted at `/tech-packs`.
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
        .route("/", get(tech_pack::list).post(tech_pack::create))
        .route(
            "/{id}",
            get(tech_pack::get_by_id)
                .put(tech_pack::update)
                .delete(tech_pack::delete),
        )
}
