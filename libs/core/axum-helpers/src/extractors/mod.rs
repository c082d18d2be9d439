//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError), so
//! malformed input produces the same error envelope as handler failures.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
