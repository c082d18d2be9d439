use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::TaskStatus;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Field update attempted on a task that is already `DONE`
    #[error("this task status is done, cannot update")]
    TaskDone(i64),

    #[error("invalid status")]
    InvalidStatus(String),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => AppError::NotFound("Task not found".to_string()),
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::TaskDone(_)
            | TaskError::InvalidStatus(_)
            | TaskError::InvalidTransition { .. } => AppError::RuleViolation(err.to_string()),
            TaskError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TaskError::NotFound(1), StatusCode::NOT_FOUND),
            (TaskError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (TaskError::TaskDone(1), StatusCode::INTERNAL_SERVER_ERROR),
            (TaskError::InvalidStatus("X".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                TaskError::InvalidTransition {
                    from: TaskStatus::Done,
                    to: TaskStatus::InProgress,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (TaskError::Database("gone".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let app_error: AppError = err.into();
            assert_eq!(app_error.status_code(), expected);
        }
    }

    #[test]
    fn test_not_found_message_is_generic() {
        let app_error: AppError = TaskError::NotFound(42).into();
        assert!(matches!(app_error, AppError::NotFound(ref msg) if msg == "Task not found"));
    }

    #[test]
    fn test_rule_violation_keeps_domain_message() {
        let app_error: AppError = TaskError::TaskDone(3).into();
        assert!(matches!(
            app_error,
            AppError::RuleViolation(ref msg) if msg == "this task status is done, cannot update"
        ));
    }
}
