use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::errors::responses::{
    BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use axum_helpers::{ApiResponse, AppError, IdPath, ValidatedJson};
use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::models::{
    CreateTaskRequest, Task, TaskUpdate, UpdateTaskRequest, UpdateTaskStatusRequest,
};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub const TAG: &str = "tasks";

/// List all tasks
#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = TAG,
    responses(
        (status = 200, description = "Tasks listed", body = ApiResponse<Vec<Task>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<ApiResponse<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(ApiResponse::success("Tasks listed", tasks))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/v1/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = ApiResponse<Task>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<ApiResponse<Task>> {
    let task = service.get_task(id).await?;
    Ok(ApiResponse::success("Task found", task))
}

/// Create a new task
///
/// The new task always starts as `TO_DO`.
#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = TAG,
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<Task>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::success("Task created", task)))
}

/// Update title and description
///
/// Tasks that are already `DONE` cannot be updated.
#[utoipa::path(
    put,
    path = "/v1/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskUpdate>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTaskRequest>,
) -> TaskResult<ApiResponse<TaskUpdate>> {
    let updated = service.update_task(input.into_update(id)).await?;
    Ok(ApiResponse::success("Task updated", updated))
}

/// Move a task to `IN_PROGRESS` or `DONE`
///
/// This route has no 404: a missing task is reported as a 500 with the error text.
#[utoipa::path(
    patch,
    path = "/v1/tasks/{id}/status",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Task status updated", body = ApiResponse<String>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_task_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTaskStatusRequest>,
) -> Result<ApiResponse<&'static str>, AppError> {
    service
        .update_task_status(id, &input.status)
        .await
        .map_err(|e| match e {
            err @ TaskError::NotFound(_) => AppError::InternalServerError(err.to_string()),
            other => other.into(),
        })?;
    Ok(ApiResponse::success("Task status updated", ""))
}

/// Soft delete a task
#[utoipa::path(
    delete,
    path = "/v1/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> Response {
    match service.delete_task(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        // Every failure, storage errors included, is reported as a missing task
        Err(e) => {
            tracing::warn!(task_id = id, error = %e, "Delete failed");
            AppError::NotFound("Task not found".to_string()).into_response()
        }
    }
}
