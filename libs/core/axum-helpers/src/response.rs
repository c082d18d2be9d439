//! Success envelope shared by every 2xx body.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const STATUS_SUCCESS: &str = "success";

/// ```json
/// { "message": "Task created", "status": "success", "data": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = "Task found")]
    pub message: String,
    /// Always `"success"`
    #[schema(example = "success")]
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::success("Task found", vec![1, 2])).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"message": "Task found", "status": "success", "data": [1, 2]})
        );
    }
}
