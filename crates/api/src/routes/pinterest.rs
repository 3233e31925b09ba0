//! Route definitions for the Pinterest integration.

use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;

use crate::handlers::pinterest;
use crate::state::AppState;

/// Routes mounted at `/pinterest`.
///
/// ```text
/// GET    /auth               -> authorize
/// GET    /callback           -> callback
/// POST   /signout            -> signout
/// GET    /boards             -> boards
/// GET    /boards/{id}/pins   -> board_pins
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", get(pinterest::authorize))
        .route("/callback", get(pinterest::callback))
        .route("/signout", post(pinterest::signout))
        .route("/boards", get(pinterest::boards))
        .route("/boards/{id}/pins", get(pinterest::board_pins))
        .layer(CookieManagerLayer::new())
}
