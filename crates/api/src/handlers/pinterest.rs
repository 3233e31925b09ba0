//! Pinterest OAuth flow and board browsing for Creative Space.
//!
//! The Pinterest access token lives only in an HTTP-only cookie and is the
//! sole credential for the board endpoints; nothing is stored server-side.

use atelier_core::error::CoreError;
use atelier_pinterest::models::{Board, Page, Pin};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use serde::Deserialize;
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "pinterest_access_token";
pub const STATE_COOKIE: &str = "pinterest_oauth_state";

/// Lifetime of the CSRF state cookie.
const STATE_COOKIE_MAX_AGE_SECS: i64 = 600;
/// Token cookie lifetime when Pinterest does not send `expires_in`.
const DEFAULT_TOKEN_MAX_AGE_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn build_cookie(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    secure: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie
}

fn expire_cookie(cookies: &Cookies, name: &'static str) {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookies.add(cookie);
}

/// `{APP_URL}/creative-space?{key}={value}`.
fn creative_space_url(app_url: &str, key: &str, value: &str) -> String {
    let base = format!("{app_url}/creative-space");
    reqwest::Url::parse_with_params(&base, &[(key, value)])
        .map(String::from)
        .unwrap_or(base)
}

fn access_token(cookies: &Cookies) -> AppResult<String> {
    cookies
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not connected to Pinterest".into()))
        })
}

/// GET /api/pinterest/auth
///
/// Redirects the browser to the Pinterest consent screen.
pub async fn authorize(State(state): State<AppState>, cookies: Cookies) -> AppResult<Redirect> {
    let client = state.pinterest()?;
    let oauth_state = uuid::Uuid::new_v4().simple().to_string();
    let url = client.authorize_url(&oauth_state)?;

    cookies.add(build_cookie(
        STATE_COOKIE,
        oauth_state,
        STATE_COOKIE_MAX_AGE_SECS,
        state.config.cookie_secure,
    ));
    Ok(Redirect::to(&url))
}

/// GET /api/pinterest/callback?code=&state=&error=
///
/// Always answers with a redirect back to Creative Space; failures are
/// reported through the `pinterest_error` query parameter.
pub async fn callback(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let app_url = state.config.app_url.as_str();
    let fail = |reason: &str| Redirect::to(&creative_space_url(app_url, "pinterest_error", reason));

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(error, "Pinterest authorization denied");
        return fail(error);
    }
    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return fail("missing_code");
    };

    let expected_state = cookies.get(STATE_COOKIE).map(|c| c.value().to_string());
    expire_cookie(&cookies, STATE_COOKIE);
    if expected_state.is_none() || expected_state != params.state {
        tracing::warn!("Pinterest OAuth state mismatch");
        return fail("invalid_state");
    }

    let Ok(client) = state.pinterest() else {
        return fail("not_configured");
    };
    let token = match client.exchange_code(code).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Pinterest token exchange failed");
            return fail("token_exchange_failed");
        }
    };

    cookies.add(build_cookie(
        TOKEN_COOKIE,
        token.access_token,
        token.expires_in.unwrap_or(DEFAULT_TOKEN_MAX_AGE_SECS),
        state.config.cookie_secure,
    ));
    tracing::info!("Pinterest account connected");
    Redirect::to(&creative_space_url(app_url, "pinterest", "connected"))
}

/// POST /api/pinterest/signout
pub async fn signout(cookies: Cookies) -> StatusCode {
    expire_cookie(&cookies, TOKEN_COOKIE);
    StatusCode::NO_CONTENT
}

/// GET /api/pinterest/boards
pub async fn boards(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Json<DataResponse<Page<Board>>>> {
    let token = access_token(&cookies)?;
    let page = state.pinterest()?.list_boards(&token).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/pinterest/boards/{id}/pins
pub async fn board_pins(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(board_id): Path<String>,
) -> AppResult<Json<DataResponse<Page<Pin>>>> {
    let token = access_token(&cookies)?;
    let page = state
        .pinterest()?
        .list_board_pins(&token, &board_id)
        .await?;
    Ok(Json(DataResponse { data: page }))
}
