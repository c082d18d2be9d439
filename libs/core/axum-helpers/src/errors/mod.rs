pub mod codes;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use validation::validation_message;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub const STATUS_ERROR: &str = "error";

/// Body of every non-2xx response.
///
/// ```json
/// { "message": "Task not found", "status": "error" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Task not found")]
    pub message: String,
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: STATUS_ERROR.to_string(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// Raw path segment that failed to parse as an identifier
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// A domain rule refused the operation; reported as a server-side failure
    #[error("Rule violation: {0}")]
    RuleViolation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::InvalidId(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RuleViolation(_)
            | AppError::Database(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                e.body_text()
            }
            AppError::ValidationError(e) => {
                let message = validation_message(&e);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    message
                );
                message
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), id = %raw, "Invalid ID");
                ErrorCode::InvalidId.default_message().to_string()
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                msg
            }
            AppError::RuleViolation(msg) => {
                tracing::warn!(error_code = ErrorCode::RuleViolation.code(), "Rule violation: {}", msg);
                msg
            }
            AppError::Database(msg) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), "Database error: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                msg
            }
        };

        error_response(status, message)
    }
}

/// Build an error envelope response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
