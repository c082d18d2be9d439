use axum_helpers::errors::validation_message;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::lifecycle::TaskLifecycle;
use crate::models::{CreateTaskRequest, Task, TaskUpdate};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
    lifecycle: TaskLifecycle,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R, lifecycle: TaskLifecycle) -> Self {
        Self {
            repository: Arc::new(repository),
            lifecycle,
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTaskRequest) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(validation_message(&e)))?;

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// General update: refused once the task is `DONE`
    ///
    /// A status carried by the update is also checked against the transition
    /// table when the lifecycle is strict. Nothing is written on failure.
    #[instrument(skip(self, update), fields(task_id = %update.id))]
    pub async fn update_task(&self, update: TaskUpdate) -> TaskResult<TaskUpdate> {
        let current = self.get_task(update.id).await?;
        self.lifecycle.ensure_updatable(&current)?;

        if let Some(&target) = update.status.as_set() {
            if self.lifecycle.checks_transitions() && target != current.status {
                self.lifecycle.ensure_transition(current.status, target)?;
            }
        }

        self.repository.update(update).await
    }

    /// Status-only update from a raw client value
    ///
    /// Lenient lifecycles never read the current status, so any known status
    /// is written, even onto a `DONE` task.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn update_task_status(&self, id: i64, status: &str) -> TaskResult<()> {
        let target = self.lifecycle.parse_target(status)?;

        if self.lifecycle.checks_transitions() {
            let current = self.get_task(id).await?;
            self.lifecycle.ensure_transition(current.status, target)?;
        }

        self.repository
            .update(TaskUpdate::status_only(id, target))
            .await?;
        Ok(())
    }

    /// Soft delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
