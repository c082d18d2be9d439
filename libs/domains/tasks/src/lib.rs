//! Tasks Domain
//!
//! CRUD over tasks with a forward-only status lifecycle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP routes, envelopes, OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, done-guard, transition checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + PostgreSQL / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, status, request bodies, partial updates
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskLifecycle, TaskService, TransitionPolicy};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgTaskRepository::new(db);
//! let service = TaskService::new(repository, TaskLifecycle::new(TransitionPolicy::Strict));
//! let router = domain_tasks::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod memory;
pub mod models;
pub mod patch;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use lifecycle::{TaskLifecycle, TransitionPolicy};
pub use memory::InMemoryTaskRepository;
pub use models::{
    CreateTaskRequest, Task, TaskStatus, TaskUpdate, UpdateTaskRequest, UpdateTaskStatusRequest,
};
pub use patch::Patch;
pub use postgres::PgTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
