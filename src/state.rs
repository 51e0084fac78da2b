//! Shared application state for all routes.

use sqlx::SqlitePool;

/// Cloned into every handler; the pool is the only shared resource.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
