//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation and cross-cutting layers
//! - Health and readiness endpoints
//! - Graceful shutdown with a bounded grace period
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let app_info = app_info!();
//! let routes = api_routes.merge(health_router(app_info.clone()));
//! let router = create_router::<ApiDoc>(routes, &app_info, &server_config);
//!
//! create_production_app(router, &server_config, async { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
