//! Application state management.

/// Shared application state.
///
/// Cloned into every router that needs it; both fields share their
/// underlying resources.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
