//! Readiness check backed by the PostgreSQL pool.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

/// Readiness check endpoint that runs `SELECT 1` against the pool.
///
/// Answers `{"status": "ready", "database": "connected"}` or 503 with
/// `"not ready"`.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await.into_response()
}
