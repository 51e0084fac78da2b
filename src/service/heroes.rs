use super::{unknown_include, Page, Resource};
use crate::error::AppError;
use crate::model::{Hero, HeroFilter, HeroPatch, HeroPower, NewHero, Power};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, name, super_name";

#[async_trait]
impl Resource for Hero {
    const KIND: &'static str = "hero";
    const PATH: &'static str = "heroes";
    const INCLUDES: &'static [&'static str] = &["powers", "hero_powers"];

    type Create = NewHero;
    type Patch = HeroPatch;
    type Filter = HeroFilter;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(pool: &SqlitePool, filter: &HeroFilter, page: Page) -> Result<Vec<Hero>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM heroes WHERE 1 = 1", COLUMNS));
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.as_str());
        }
        if let Some(super_name) = &filter.super_name {
            qb.push(" AND super_name = ").push_bind(super_name.as_str());
        }
        page.push_to(&mut qb);
        Ok(qb.build_query_as::<Hero>().fetch_all(pool).await?)
    }

    async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Hero>, AppError> {
        let hero = sqlx::query_as::<_, Hero>(&format!("SELECT {} FROM heroes WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(hero)
    }

    async fn create(pool: &SqlitePool, input: NewHero) -> Result<Hero, AppError> {
        let (name, super_name) = input.validate()?;
        let hero = sqlx::query_as::<_, Hero>(&format!(
            "INSERT INTO heroes (name, super_name) VALUES (?, ?) RETURNING {}",
            COLUMNS
        ))
        .bind(name)
        .bind(super_name)
        .fetch_one(pool)
        .await?;
        Ok(hero)
    }

    async fn update(pool: &SqlitePool, id: i64, patch: HeroPatch) -> Result<Option<Hero>, AppError> {
        let (name, super_name) = patch.validate()?;
        let hero = sqlx::query_as::<_, Hero>(&format!(
            "UPDATE heroes SET name = COALESCE(?, name), super_name = COALESCE(?, super_name) \
             WHERE id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(name)
        .bind(super_name)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(hero)
    }

    async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn include(&self, pool: &SqlitePool, name: &str) -> Result<Value, AppError> {
        match name {
            "powers" => {
                let powers = sqlx::query_as::<_, Power>(
                    "SELECT p.id, p.name, p.description FROM powers p \
                     JOIN hero_powers hp ON hp.power_id = p.id \
                     WHERE hp.hero_id = ? ORDER BY hp.id",
                )
                .bind(self.id)
                .fetch_all(pool)
                .await?;
                Ok(serde_json::to_value(powers)?)
            }
            "hero_powers" => {
                let rows = sqlx::query_as::<_, HeroPower>(
                    "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE hero_id = ? ORDER BY id",
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
