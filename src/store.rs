//! Connection pool setup. The pool is created once and handed to the router through `AppState`.

use crate::config::DatabaseConfig;
use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// How long a connection waits on a locked database before failing with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `config.url`, creating the database file if it does not exist.
/// Foreign keys are switched on for every connection. File databases run in WAL mode so
/// readers do not block the writer, and writers queue on the lock for `BUSY_TIMEOUT`.
///
/// An in-memory database lives only as long as its connection, so it gets exactly one
/// connection that is never closed for idleness or age.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| ConfigError::Invalid {
            var: "DATABASE_URL",
            value: config.url.clone(),
            reason: e.to_string(),
        })?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let (options, pool_options) = if config.is_in_memory() {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        (options.journal_mode(SqliteJournalMode::Wal), pool_options)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(url = %config.url, "database pool ready");
    Ok(pool)
}

/// Cheap liveness probe used by the readiness route.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let config = DatabaseConfig {
            url: "sqlite://app.db?mode=bogus".into(),
            max_connections: 1,
        };
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { var: "DATABASE_URL", .. })
        ));
    }

    #[tokio::test]
    async fn file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("wal.db").display()),
            max_connections: 2,
        };
        let pool = connect(&config).await.unwrap();
        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode, "wal");
        pool.close().await;
    }
}
