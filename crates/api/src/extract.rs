//! Request extractors with the project's error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (malformed JSON, missing fields, wrong
/// types, missing content type) become a 400 `BAD_REQUEST` [`AppError`]
/// instead of axum's plain-text 415/422 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
