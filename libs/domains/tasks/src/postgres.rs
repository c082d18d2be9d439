use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTaskRequest, Task, TaskUpdate},
    repository::TaskRepository,
};

/// PostgreSQL-backed [`TaskRepository`]
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> sea_orm::Select<entity::Entity> {
        entity::Entity::find().filter(entity::Column::DeletedAt.is_null())
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: CreateTaskRequest) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = Self::live()
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, update: TaskUpdate) -> TaskResult<TaskUpdate> {
        let active_model = entity::ActiveModel::try_from(&update)?;

        if !active_model.is_changed() {
            // Nothing to write; still report a missing task
            self.get_by_id(update.id)
                .await?
                .ok_or(TaskError::NotFound(update.id))?;
            return Ok(update);
        }

        let result = entity::Entity::update_many()
            .set(active_model)
            .filter(entity::Column::Id.eq(update.id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TaskError::NotFound(update.id));
        }

        tracing::info!(task_id = update.id, "Updated task");
        Ok(update)
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let tombstone = entity::ActiveModel {
            deleted_at: Set(Some(chrono::Utc::now().into())),
            ..Default::default()
        };

        let result = entity::Entity::update_many()
            .set(tombstone)
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = Self::live()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
