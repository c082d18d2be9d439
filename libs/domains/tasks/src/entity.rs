use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTaskRequest, Task, TaskStatus, TaskUpdate};
use crate::patch::Patch;

/// Sea-ORM Entity for Tasks table
///
/// Rows with `deleted_at` set are tombstones and invisible to every query in
/// [`crate::postgres`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: TaskStatus,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
        }
    }
}

// New rows always start as TO_DO
impl From<CreateTaskRequest> for ActiveModel {
    fn from(input: CreateTaskRequest) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            status: Set(TaskStatus::ToDo),
            deleted_at: Set(None),
        }
    }
}

// Only the `Patch::Set` columns end up in the UPDATE statement
impl TryFrom<&TaskUpdate> for ActiveModel {
    type Error = TaskError;

    fn try_from(update: &TaskUpdate) -> TaskResult<Self> {
        Ok(ActiveModel {
            id: NotSet,
            title: patch_column("title", &update.title)?,
            description: patch_column("description", &update.description)?,
            status: patch_column("status", &update.status)?,
            deleted_at: NotSet,
        })
    }
}

fn patch_column<T>(field: &str, patch: &Patch<T>) -> TaskResult<ActiveValue<T>>
where
    T: Clone + Into<Value>,
{
    match patch {
        Patch::Unchanged => Ok(NotSet),
        Patch::Set(value) => Ok(Set(value.clone())),
        Patch::Clear => Err(TaskError::Validation(format!(
            "field '{}' cannot be null",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_forces_todo() {
        let active: ActiveModel = CreateTaskRequest {
            title: "Title".to_string(),
            description: "Description".to_string(),
        }
        .into();

        assert_eq!(active.status, Set(TaskStatus::ToDo));
        assert_eq!(active.id, NotSet);
    }

    #[test]
    fn test_update_sets_only_supplied_columns() {
        let update = TaskUpdate::status_only(5, TaskStatus::Done);
        let active = ActiveModel::try_from(&update).unwrap();

        assert_eq!(active.status, Set(TaskStatus::Done));
        assert_eq!(active.title, NotSet);
        assert_eq!(active.description, NotSet);
        assert_eq!(active.deleted_at, NotSet);
    }

    #[test]
    fn test_update_rejects_null() {
        let update = TaskUpdate {
            id: 5,
            title: Patch::Clear,
            description: Patch::Unchanged,
            status: Patch::Unchanged,
        };

        let err = ActiveModel::try_from(&update).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: field 'title' cannot be null");
    }
}
