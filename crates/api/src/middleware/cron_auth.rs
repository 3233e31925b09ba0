//! Shared-secret guard for scheduled endpoints.

use atelier_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::middleware::bearer_token;
use crate::state::AppState;

/// Proof that the request carried `Authorization: Bearer <CRON_SECRET>`.
///
/// Rejects every request when `CRON_SECRET` is not configured.
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.cron_secret.as_deref() else {
            tracing::warn!("Cron request rejected: CRON_SECRET is not configured");
            return Err(unauthorized());
        };

        match bearer_token(parts) {
            Some(token) if token.as_bytes().ct_eq(secret.as_bytes()).into() => Ok(CronAuth),
            _ => Err(unauthorized()),
        }
    }
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid cron secret".into()))
}
