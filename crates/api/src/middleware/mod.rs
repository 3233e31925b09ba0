//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- the signed-in user, from a Supabase JWT.
//! - [`cron_auth::CronAuth`] -- a scheduler call carrying `CRON_SECRET`.

pub mod auth;
pub mod cron_auth;

/// Return the token of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(parts: &axum::http::request::Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
