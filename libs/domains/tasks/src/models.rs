use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::patch::Patch;

/// Task status
///
/// Transition rules live in [`crate::lifecycle`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task not started
    #[default]
    #[sea_orm(string_value = "TO_DO")]
    ToDo,
    /// Task in progress
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Task completed
    #[sea_orm(string_value = "DONE")]
    Done,
}

/// Task entity - represents a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Task {
    /// Identifier assigned by storage
    #[schema(example = 1)]
    #[ts(type = "number")]
    pub id: i64,
    #[schema(example = "Later is never")]
    pub title: String,
    #[schema(example = "When 'later' turns into 'never', it's just your code's way of saying it loves the TODO comments.")]
    pub description: String,
    pub status: TaskStatus,
}

/// Body of `POST /v1/tasks`
///
/// There is no status field: new tasks always start as `TO_DO`, and a status
/// sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, max = 100))]
    #[schema(example = "Later is never", min_length = 3, max_length = 100)]
    pub title: String,
    #[validate(length(min = 3, max = 25500))]
    #[schema(
        example = "When 'later' turns into 'never', it's just your code's way of saying it loves the TODO comments.",
        min_length = 3,
        max_length = 25500
    )]
    pub description: String,
}

/// Body of `PUT /v1/tasks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, max = 100))]
    #[schema(example = "Code runs, coffee fuels", min_length = 3, max_length = 100)]
    pub title: String,
    #[validate(length(min = 3, max = 25500))]
    #[schema(
        example = "Coding without coffee is like debugging without a console log.",
        min_length = 3,
        max_length = 25500
    )]
    pub description: String,
}

impl UpdateTaskRequest {
    pub fn into_update(self, id: i64) -> TaskUpdate {
        TaskUpdate {
            id,
            title: Patch::Set(self.title),
            description: Patch::Set(self.description),
            status: Patch::Unchanged,
        }
    }
}

/// Statuses a client may move a task to
pub const STATUS_TARGETS: [TaskStatus; 2] = [TaskStatus::InProgress, TaskStatus::Done];

/// Body of `PATCH /v1/tasks/{id}/status`
///
/// `status` stays a raw string so unknown values reach the validator and
/// produce the usual field message instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateTaskStatusRequest {
    #[validate(custom(function = "validate_status_target"))]
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
}

fn validate_status_target(status: &str) -> Result<(), ValidationError> {
    if STATUS_TARGETS
        .iter()
        .any(|target| target.to_string() == status)
    {
        return Ok(());
    }

    let values = STATUS_TARGETS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut error = ValidationError::new("oneof");
    error.add_param("values".into(), &values);
    error.add_param("value".into(), &status);
    Err(error)
}

/// Partial update of a task; also the `data` of a successful update response
///
/// Omitted fields are not written. `null` is accepted on the wire but rejected
/// by the repositories, since none of these columns is nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskUpdate {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    #[schema(value_type = Option<String>, example = "Code runs, coffee fuels")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    #[schema(value_type = Option<TaskStatus>)]
    pub status: Patch<TaskStatus>,
}

impl TaskUpdate {
    /// Update that touches nothing but the status
    pub fn status_only(id: i64, status: TaskStatus) -> Self {
        Self {
            id,
            title: Patch::Unchanged,
            description: Patch::Unchanged,
            status: Patch::Set(status),
        }
    }

    /// First field explicitly set to `null`, if any
    pub fn cleared_field(&self) -> Option<&'static str> {
        if self.title == Patch::Clear {
            Some("title")
        } else if self.description == Patch::Clear {
            Some("description")
        } else if self.status == Patch::Clear {
            Some("status")
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_unchanged() && self.description.is_unchanged() && self.status.is_unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(TaskStatus::ToDo).unwrap(), json!("TO_DO"));
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            json!("IN_PROGRESS")
        );
        assert_eq!(TaskStatus::Done.to_string(), "DONE");
        assert_eq!(TaskStatus::from_str("IN_PROGRESS").unwrap(), TaskStatus::InProgress);
        assert!(TaskStatus::from_str("done").is_err());
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: 1,
            title: "T".to_string(),
            description: "D".to_string(),
            status: TaskStatus::ToDo,
        };

        assert_eq!(
            serde_json::to_value(task).unwrap(),
            json!({"id": 1, "title": "T", "description": "D", "status": "TO_DO"})
        );
    }

    #[test]
    fn test_create_request_ignores_status() {
        let request: CreateTaskRequest = serde_json::from_value(
            json!({"title": "Write docs", "description": "All of them", "status": "DONE"}),
        )
        .unwrap();

        assert_eq!(request.title, "Write docs");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_length_bounds() {
        let short = CreateTaskRequest {
            title: "ab".to_string(),
            description: "abc".to_string(),
        };
        let errors = short.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(!errors.field_errors().contains_key("description"));

        let long = CreateTaskRequest {
            title: "x".repeat(101),
            description: "y".repeat(25501),
        };
        let errors = long.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);

        let edges = CreateTaskRequest {
            title: "x".repeat(100),
            description: "y".repeat(25500),
        };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_status_request_accepts_only_targets() {
        for status in ["IN_PROGRESS", "DONE"] {
            let request = UpdateTaskStatusRequest {
                status: status.to_string(),
            };
            assert!(request.validate().is_ok(), "{status} should be accepted");
        }

        for status in ["TO_DO", "done", "", "ARCHIVED"] {
            let request = UpdateTaskStatusRequest {
                status: status.to_string(),
            };
            assert!(request.validate().is_err(), "{status} should be rejected");
        }
    }

    #[test]
    fn test_status_request_error_params() {
        let errors = UpdateTaskStatusRequest {
            status: "ARCHIVED".to_string(),
        }
        .validate()
        .unwrap_err();

        let field_errors = errors.field_errors();
        let error = &field_errors["status"][0];
        assert_eq!(error.code, "oneof");
        assert_eq!(error.params["values"], json!("IN_PROGRESS DONE"));
        assert_eq!(error.params["value"], json!("ARCHIVED"));
    }

    #[test]
    fn test_update_request_into_update() {
        let update = UpdateTaskRequest {
            title: "New title".to_string(),
            description: "New description".to_string(),
        }
        .into_update(7);

        assert_eq!(update.id, 7);
        assert_eq!(update.title, Patch::Set("New title".to_string()));
        assert!(update.status.is_unchanged());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"id": 7, "title": "New title", "description": "New description"})
        );
    }

    #[test]
    fn test_cleared_field() {
        let update: TaskUpdate =
            serde_json::from_value(json!({"id": 1, "title": "ok", "description": null})).unwrap();

        assert_eq!(update.cleared_field(), Some("description"));
        assert!(!update.is_empty());
        assert!(TaskUpdate::status_only(1, TaskStatus::Done).cleared_field().is_none());
    }
}
