use super::{unknown_include, Page, Resource};
use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerFilter, HeroPowerPatch, NewHeroPower, Power, Strength};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, strength, hero_id, power_id";

#[async_trait]
impl Resource for HeroPower {
    const KIND: &'static str = "hero_power";
    const PATH: &'static str = "hero_powers";
    const INCLUDES: &'static [&'static str] = &["hero", "power"];

    type Create = NewHeroPower;
    type Patch = HeroPowerPatch;
    type Filter = HeroPowerFilter;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(pool: &SqlitePool, filter: &HeroPowerFilter, page: Page) -> Result<Vec<HeroPower>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM hero_powers WHERE 1 = 1", COLUMNS));
        if let Some(hero_id) = filter.hero_id {
            qb.push(" AND hero_id = ").push_bind(hero_id);
        }
        if let Some(power_id) = filter.power_id {
            qb.push(" AND power_id = ").push_bind(power_id);
        }
        if let Some(strength) = filter.strength {
            qb.push(" AND strength = ").push_bind(strength.as_str());
        }
        page.push_to(&mut qb);
        Ok(qb.build_query_as::<HeroPower>().fetch_all(pool).await?)
    }

    async fn find(pool: &SqlitePool, id: i64) -> Result<Option<HeroPower>, AppError> {
        let row = sqlx::query_as::<_, HeroPower>(&format!("SELECT {} FROM hero_powers WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn create(pool: &SqlitePool, input: NewHeroPower) -> Result<HeroPower, AppError> {
        let (strength, hero_id, power_id) = input.validate()?;
        let row = sqlx::query_as::<_, HeroPower>(&format!(
            "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?) RETURNING {}",
            COLUMNS
        ))
        .bind(strength.as_str())
        .bind(hero_id)
        .bind(power_id)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn update(pool: &SqlitePool, id: i64, patch: HeroPowerPatch) -> Result<Option<HeroPower>, AppError> {
        let (strength, hero_id, power_id) = patch.validate()?;
        let row = sqlx::query_as::<_, HeroPower>(&format!(
            "UPDATE hero_powers SET strength = COALESCE(?, strength), \
             hero_id = COALESCE(?, hero_id), power_id = COALESCE(?, power_id) \
             WHERE id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(strength.map(Strength::as_str))
        .bind(hero_id)
        .bind(power_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM hero_powers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn include(&self, pool: &SqlitePool, name: &str) -> Result<Value, AppError> {
        match name {
            "hero" => Ok(serde_json::to_value(Hero::find(pool, self.hero_id).await?)?),
            "power" => Ok(serde_json::to_value(Power::find(pool, self.power_id).await?)?),
            other => Err(unknown_include::<Self>(other)),
        }
    }
}
