//! Generic CRUD entry points used by the HTTP handlers.

use super::{unknown_include, Page, Resource};
use crate::error::AppError;
use serde_json::Value;
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    pub async fn list<R: Resource>(
        pool: &SqlitePool,
        filter: &R::Filter,
        page: Page,
    ) -> Result<Vec<R>, AppError> {
        let rows = R::list(pool, filter, page).await?;
        tracing::debug!(kind = R::KIND, count = rows.len(), "list");
        Ok(rows)
    }

    /// Fetch one row by id and embed the requested includes as extra keys.
    pub async fn read<R: Resource>(
        pool: &SqlitePool,
        id: i64,
        includes: &[&str],
    ) -> Result<Value, AppError> {
        if let Some(unknown) = includes
            .iter()
            .copied()
            .find(|name| !R::INCLUDES.iter().any(|known| known == name))
        {
            return Err(unknown_include::<R>(unknown));
        }
        let row = R::find(pool, id)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        let mut value = serde_json::to_value(&row)?;
        if let Value::Object(map) = &mut value {
            for name in includes {
                map.insert((*name).to_string(), row.include(pool, name).await?);
            }
        }
        Ok(value)
    }

    pub async fn create<R: Resource>(pool: &SqlitePool, input: R::Create) -> Result<R, AppError> {
        let row = R::create(pool, input).await?;
        tracing::info!(kind = R::KIND, id = row.id(), "created");
        Ok(row)
    }

    pub async fn update<R: Resource>(
        pool: &SqlitePool,
        id: i64,
        patch: R::Patch,
    ) -> Result<R, AppError> {
        let row = R::update(pool, id, patch)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tracing::info!(kind = R::KIND, id, "updated");
        Ok(row)
    }

    pub async fn delete<R: Resource>(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        if !R::delete(pool, id).await? {
            return Err(not_found::<R>(id));
        }
        tracing::info!(kind = R::KIND, id, "deleted");
        Ok(())
    }
}

fn not_found<R: Resource>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", R::KIND, id))
}
