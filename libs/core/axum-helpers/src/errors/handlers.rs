use axum::{http::StatusCode, response::Response};
use std::any::Any;

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound.default_message())
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message(),
    )
}

/// Turns a handler panic caught by `CatchPanicLayer` into a 500 error envelope.
///
/// The panic payload is logged, never sent to the client.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        panic = detail,
        "Handler panicked"
    );
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError.default_message(),
    )
}
