use axum::Router;
use domain_tasks::{PgTaskRepository, TaskLifecycle, TaskService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTaskRepository::new(state.db.clone());
    let lifecycle = TaskLifecycle::new(state.config.transition_policy);
    let service = TaskService::new(repository, lifecycle);
    handlers::router(service)
}
