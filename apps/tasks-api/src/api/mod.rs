use axum::Router;

pub mod health;
pub mod tasks;

/// Creates the API routes.
///
/// Returns a stateless Router (all sub-routers have state already applied).
/// Task routes carry absolute `/v1/tasks` paths, so they are merged at the root.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(tasks::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
