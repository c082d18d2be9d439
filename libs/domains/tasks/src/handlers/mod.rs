mod tasks;

use axum::{
    Router,
    routing::{get, patch},
};
use axum_helpers::errors::responses::{
    BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use axum_helpers::{ApiResponse, ErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CreateTaskRequest, Task, TaskStatus, TaskUpdate, UpdateTaskRequest, UpdateTaskStatusRequest,
};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub use tasks::TAG;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::update_task,
        tasks::update_task_status,
        tasks::delete_task,
    ),
    components(
        schemas(
            Task,
            TaskStatus,
            TaskUpdate,
            CreateTaskRequest,
            UpdateTaskRequest,
            UpdateTaskStatusRequest,
            ApiResponse<Task>,
            ApiResponse<Vec<Task>>,
            ApiResponse<TaskUpdate>,
            ErrorResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the task router with all HTTP endpoints
///
/// Paths are absolute (`/v1/tasks...`), so the router is merged, not nested.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/v1/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/v1/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/v1/tasks/{id}/status", patch(tasks::update_task_status))
        .with_state(shared_service)
}
