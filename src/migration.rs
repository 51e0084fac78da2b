//! Schema DDL for heroes, powers and the hero_powers join table.
//! Statements are idempotent (IF NOT EXISTS) and applied in dependency order.

use crate::error::AppError;
use sqlx::SqlitePool;

const SCHEMA: &[(&str, &str)] = &[
    (
        "heroes",
        r#"
        CREATE TABLE IF NOT EXISTS heroes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            super_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "powers",
        r#"
        CREATE TABLE IF NOT EXISTS powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    ),
    (
        "hero_powers",
        r#"
        CREATE TABLE IF NOT EXISTS hero_powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            strength TEXT NOT NULL CHECK (strength IN ('Strong', 'Weak', 'Average')),
            hero_id INTEGER NOT NULL REFERENCES heroes (id) ON DELETE CASCADE,
            power_id INTEGER NOT NULL REFERENCES powers (id) ON DELETE CASCADE
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS hero_powers_hero_id_idx ON hero_powers (hero_id)",
    "CREATE INDEX IF NOT EXISTS hero_powers_power_id_idx ON hero_powers (power_id)",
];

/// Create all tables and indexes in one transaction. Safe to run on every start.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for (table, ddl) in SCHEMA {
        tracing::debug!(table = %table, "ensure table");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(tables = SCHEMA.len(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::store::connect;

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn creates_all_tables_and_is_idempotent() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        apply_migrations(&pool).await.unwrap();
        apply_migrations(&pool).await.unwrap();
        assert_eq!(table_names(&pool).await, vec!["hero_powers", "heroes", "powers"]);
    }

    #[tokio::test]
    async fn strength_check_rejects_unknown_values() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        apply_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO heroes (name, super_name) VALUES ('Kamala Khan', 'Ms. Marvel')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO powers (name, description) VALUES ('flight', 'gives the wielder the ability to fly')")
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES ('Mighty', 1, 1)")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(err.as_database_error().unwrap().is_check_violation());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        apply_migrations(&pool).await.unwrap();
        let err = sqlx::query("INSERT INTO hero_powers (strength, hero_id, power_id) VALUES ('Weak', 42, 42)")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(err.as_database_error().unwrap().is_foreign_key_violation());
    }
}
