//! In-memory repository for handler tests and local runs without PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{TaskError, TaskResult},
    models::{CreateTaskRequest, Task, TaskStatus, TaskUpdate},
    repository::TaskRepository,
};

#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoredTask {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Ids start at 1 and are never reused, tombstones included.
#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    tasks: BTreeMap<i64, StoredTask>,
}

impl Store {
    fn live_mut(&mut self, id: i64) -> Option<&mut StoredTask> {
        self.tasks.get_mut(&id).filter(|stored| stored.is_live())
    }
}

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTaskRequest) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let task = Task {
            id: store.last_id,
            title: input.title,
            description: input.description,
            status: TaskStatus::ToDo,
        };
        store.tasks.insert(
            task.id,
            StoredTask {
                task: task.clone(),
                deleted_at: None,
            },
        );

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .get(&id)
            .filter(|stored| stored.is_live())
            .map(|stored| stored.task.clone()))
    }

    async fn update(&self, update: TaskUpdate) -> TaskResult<TaskUpdate> {
        if let Some(field) = update.cleared_field() {
            return Err(TaskError::Validation(format!(
                "field '{}' cannot be null",
                field
            )));
        }

        let mut store = self.store.write().await;
        let stored = store
            .live_mut(update.id)
            .ok_or(TaskError::NotFound(update.id))?;

        let task = &mut stored.task;
        update.title.clone().apply_to(&mut task.title);
        update.description.clone().apply_to(&mut task.description);
        update.status.clone().apply_to(&mut task.status);

        if !update.is_empty() {
            tracing::info!(task_id = update.id, "Updated task");
        }
        Ok(update)
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let mut store = self.store.write().await;
        match store.live_mut(id) {
            Some(stored) => {
                stored.deleted_at = Some(Utc::now());
                tracing::info!(task_id = id, "Deleted task");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|stored| stored.is_live())
            .map(|stored| stored.task.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;

    fn input(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: format!("{} description", title),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_across_deletes() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.create(input("first")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        let second = repo.create(input("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_deleted_task_is_invisible() {
        let repo = InMemoryTaskRepository::new();
        let kept = repo.create(input("kept")).await.unwrap();
        let gone = repo.create(input("gone")).await.unwrap();

        assert!(repo.delete(gone.id).await.unwrap());

        assert!(repo.get_by_id(gone.id).await.unwrap().is_none());
        assert!(!repo.delete(gone.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec![kept]);
        assert!(matches!(
            repo.update(TaskUpdate::status_only(gone.id, TaskStatus::Done))
                .await,
            Err(TaskError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_writes_only_supplied_fields() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(input("original")).await.unwrap();

        let update = TaskUpdate {
            id: task.id,
            title: Patch::Set("renamed".to_string()),
            description: Patch::Unchanged,
            status: Patch::Unchanged,
        };
        repo.update(update).await.unwrap();

        let stored = repo.get_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.description, task.description);
        assert_eq!(stored.status, TaskStatus::ToDo);
    }

    #[tokio::test]
    async fn test_update_rejects_null_without_writing() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(input("original")).await.unwrap();

        let update = TaskUpdate {
            id: task.id,
            title: Patch::Set("renamed".to_string()),
            description: Patch::Clear,
            status: Patch::Unchanged,
        };
        let result = repo.update(update).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
        assert_eq!(repo.get_by_id(task.id).await.unwrap().unwrap(), task);
    }
}
