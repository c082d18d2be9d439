use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTaskRequest, Task, TaskUpdate};

/// Repository trait for Task persistence
///
/// Soft-deleted tasks behave as if they did not exist for every method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task; the status is always `TO_DO` and the id comes from storage
    async fn create(&self, input: CreateTaskRequest) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Write the supplied fields only
    ///
    /// Fails with `NotFound` when no live task has `update.id`, and with
    /// `Validation` when a field is cleared.
    async fn update(&self, update: TaskUpdate) -> TaskResult<TaskUpdate>;

    /// Set the tombstone; `false` when there was no live task to delete
    async fn delete(&self, id: i64) -> TaskResult<bool>;

    /// Live tasks ordered by id
    async fn list(&self) -> TaskResult<Vec<Task>>;
}
