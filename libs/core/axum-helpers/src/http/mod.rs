//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - Request ID generation
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer(&server_config.cors_allowed_origins));
//! ```

pub mod cors;
pub mod request_id;
pub mod security;

pub use cors::{cors_layer, create_cors_layer, create_permissive_cors_layer};
pub use request_id::{REQUEST_ID_HEADER, TimestampRequestId};
pub use security::security_headers;
