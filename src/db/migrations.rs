//! Embedded schema migrations.
//!
//! `MigrationHarness` only works on a synchronous connection, so every
//! function here opens its own `PgConnection` and must run off the async
//! runtime (see `run_blocking`).

use diesel::Connection;
use diesel::migration::Migration;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn connect(database_url: &str, purpose: &str) -> AppResult<PgConnection> {
    PgConnection::establish(database_url).map_err(|e| AppError::Database {
        operation: format!("establish connection for {}", purpose),
        source: anyhow::anyhow!("Connection error: {}", e),
    })
}

fn migration_error(operation: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Migration error: {}", e),
    }
}

/// Names of migrations not yet applied.
pub fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let mut conn = connect(database_url, "migration check")?;
    let pending = conn
        .pending_migrations(MIGRATIONS)
        .map_err(|e| migration_error("check pending migrations", e))?;
    Ok(pending.iter().map(|m| m.name().to_string()).collect())
}

/// Applies every pending migration and returns the applied versions.
pub fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let mut conn = connect(database_url, "migrations")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| migration_error("run pending migrations", e))?;
    Ok(applied.iter().map(|v| v.to_string()).collect())
}

/// Reverts the last `steps` migrations, newest first.
pub fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    if steps == 0 {
        return Err(rollback_steps_error(
            "Number of rollback steps must be greater than 0".to_string(),
        ));
    }

    let mut conn = connect(database_url, "rollback")?;
    let applied = conn
        .applied_migrations()
        .map_err(|e| migration_error("get applied migrations", e))?;
    if applied.len() < steps as usize {
        return Err(rollback_steps_error(format!(
            "Cannot rollback {} migrations - only {} applied migrations available",
            steps,
            applied.len()
        )));
    }

    let mut reverted = Vec::with_capacity(steps as usize);
    for _ in 0..steps {
        let version = conn
            .revert_last_migration(MIGRATIONS)
            .map_err(|e| migration_error("revert migration", e))?;
        reverted.push(version.to_string());
    }
    Ok(reverted)
}

fn rollback_steps_error(reason: String) -> AppError {
    AppError::Validation {
        field: "rollback_steps".to_string(),
        reason,
    }
}

/// Runs a blocking migration function on tokio's blocking pool.
pub async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;

    #[test]
    fn test_embedded_migrations_are_ordered() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).unwrap();
        let names: Vec<String> = migrations.iter().map(|m| m.name().to_string()).collect();

        assert_eq!(names.len(), 2);
        assert!(names[0].contains("create_members"));
        assert!(names[1].contains("create_orders"));
    }

    #[test]
    fn test_zero_rollback_steps_rejected_before_connecting() {
        match revert_migrations("postgres://unreachable.invalid/shop", 0) {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_run_blocking_propagates_result() {
        let value = run_blocking(|| Ok(7)).await.unwrap();
        assert_eq!(value, 7);

        let err = run_blocking::<(), _>(|| {
            Err(AppError::BadRequest {
                message: "nope".to_string(),
            })
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
