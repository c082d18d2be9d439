//! Numeric identifier path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a positive integer `{id}` path parameter.
///
/// Anything else (non-digits, zero, negative, overflow) is rejected with
/// `400 Invalid ID format` before the handler runs.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_task(IdPath(id): IdPath) -> String {
///     format!("Task ID: {}", id)
/// }
///
/// let app = Router::new().route("/v1/tasks/{id}", get(get_task));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl IdPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::InvalidId(raw.to_string())),
        }
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        IdPath::parse(&raw)
    }
}
