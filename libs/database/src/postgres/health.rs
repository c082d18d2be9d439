use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Verify the pool can reach PostgreSQL by running `SELECT 1`.
///
/// Backs the readiness probe: any failure to acquire a connection or run the
/// statement is reported as [`DatabaseError::HealthCheckFailed`].
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL unreachable: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
