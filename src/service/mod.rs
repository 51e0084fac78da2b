//! CRUD execution against SQLite, one `Resource` impl per table.

mod crud;
mod hero_powers;
mod heroes;
mod powers;
pub mod validation;

pub use crud::CrudService;
pub use validation::RequestValidator;

use crate::error::AppError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Hard cap on `limit` for list queries.
pub const MAX_LIMIT: u32 = 1000;

/// `limit` / `offset` query parameters. No `limit` means the whole collection.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Page {
    /// Appends `ORDER BY id LIMIT ? OFFSET ?`. SQLite treats a negative limit as unbounded.
    pub(crate) fn push_to(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let limit = self.limit.map(|l| i64::from(l.min(MAX_LIMIT))).unwrap_or(-1);
        qb.push(" ORDER BY id LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(i64::from(self.offset.unwrap_or(0)));
    }
}

/// A table exposed as a REST collection.
#[async_trait]
pub trait Resource: Serialize + Sized + Send + Sync + 'static {
    /// Singular name for messages and logs.
    const KIND: &'static str;
    /// Collection path segment, e.g. `heroes`.
    const PATH: &'static str;
    /// Names accepted by `?include=` on a single read.
    const INCLUDES: &'static [&'static str] = &[];

    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;
    type Filter: DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> i64;

    async fn list(pool: &SqlitePool, filter: &Self::Filter, page: Page) -> Result<Vec<Self>, AppError>;

    async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Self>, AppError>;

    async fn create(pool: &SqlitePool, input: Self::Create) -> Result<Self, AppError>;

    /// Apply the patch in a single `UPDATE ... RETURNING`. `None` when the row does not exist.
    async fn update(pool: &SqlitePool, id: i64, patch: Self::Patch) -> Result<Option<Self>, AppError>;

    /// `false` when no row was deleted.
    async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError>;

    /// Related data for one name from `INCLUDES`.
    async fn include(&self, pool: &SqlitePool, name: &str) -> Result<Value, AppError>;
}

/// Error for an `?include=` name outside `R::INCLUDES`. `CrudService::read` rejects these
/// before the lookup; the `include` impls return it for the same names.
pub(crate) fn unknown_include<R: Resource>(name: &str) -> AppError {
    AppError::BadRequest(format!(
        "unknown include '{}' for {}; expected one of: {}",
        name,
        R::KIND,
        R::INCLUDES.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeroPower;

    #[tokio::test]
    async fn include_outside_the_known_names_is_rejected() {
        let pool = crate::store::connect(&crate::config::DatabaseConfig::in_memory())
            .await
            .unwrap();
        let row = HeroPower {
            id: 1,
            strength: crate::model::Strength::Weak,
            hero_id: 1,
            power_id: 1,
        };
        let err = row.include(&pool, "villain").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(m) if m == "unknown include 'villain' for hero_power; expected one of: hero, power"
        ));
    }
}
