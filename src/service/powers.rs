use super::{unknown_include, Page, Resource};
use crate::error::AppError;
use crate::model::{Hero, HeroPower, NewPower, Power, PowerFilter, PowerPatch};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, name, description";

#[async_trait]
impl Resource for Power {
    const KIND: &'static str = "power";
    const PATH: &'static str = "powers";
    const INCLUDES: &'static [&'static str] = &["heroes", "hero_powers"];

    type Create = NewPower;
    type Patch = PowerPatch;
    type Filter = PowerFilter;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(pool: &SqlitePool, filter: &PowerFilter, page: Page) -> Result<Vec<Power>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM powers WHERE 1 = 1", COLUMNS));
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.as_str());
        }
        page.push_to(&mut qb);
        Ok(qb.build_query_as::<Power>().fetch_all(pool).await?)
    }

    async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Power>, AppError> {
        let power = sqlx::query_as::<_, Power>(&format!("SELECT {} FROM powers WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(power)
    }

    async fn create(pool: &SqlitePool, input: NewPower) -> Result<Power, AppError> {
        let (name, description) = input.validate()?;
        let power = sqlx::query_as::<_, Power>(&format!(
            "INSERT INTO powers (name, description) VALUES (?, ?) RETURNING {}",
            COLUMNS
        ))
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;
        Ok(power)
    }

    async fn update(pool: &SqlitePool, id: i64, patch: PowerPatch) -> Result<Option<Power>, AppError> {
        let (name, description) = patch.validate()?;
        let power = sqlx::query_as::<_, Power>(&format!(
            "UPDATE powers SET name = COALESCE(?, name), description = COALESCE(?, description) \
             WHERE id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(power)
    }

    async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM powers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn include(&self, pool: &SqlitePool, name: &str) -> Result<Value, AppError> {
        match name {
            "heroes" => {
                let heroes = sqlx::query_as::<_, Hero>(
                    "SELECT h.id, h.name, h.super_name FROM heroes h \
                     JOIN hero_powers hp ON hp.hero_id = h.id \
                     WHERE hp.power_id = ? ORDER BY hp.id",
                )
                .bind(self.id)
                .fetch_all(pool)
                .await?;
                Ok(serde_json::to_value(heroes)?)
            }
            "hero_powers" => {
                let rows = sqlx::query_as::<_, HeroPower>(
                    "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE power_id = ? ORDER BY id",
                )
                .bind(self.id)
                .fetch_all(pool)
                .await?;
                Ok(serde_json::to_value(rows)?)
            }
            other => Err(unknown_include::<Self>(other)),
        }
    }
}
