//! CRUD handlers: list, create, read, update, delete. Each is instantiated once per resource.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiQuery};
use crate::response::{created, no_content, ok};
use crate::service::{CrudService, Page, Resource};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

/// `?include=a,b` on a single read.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeParams {
    pub include: Option<String>,
}

impl IncludeParams {
    /// Requested names, trimmed, without blanks or repeats.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.include.as_deref().unwrap_or("").split(',').map(str::trim) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<R::Filter>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<R>(&state.pool, &filter, page).await?;
    Ok(ok(rows))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<R::Create>,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::create::<R>(&state.pool, body).await?;
    Ok(created(row))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiQuery(params): ApiQuery<IncludeParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read::<R>(&state.pool, id, &params.names()).await?;
    Ok(ok(row))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::update::<R>(&state.pool, id, patch).await?;
    Ok(ok(row))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    CrudService::delete::<R>(&state.pool, id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_names_are_trimmed_and_deduplicated() {
        let params = IncludeParams {
            include: Some(" powers, hero_powers,,powers ".into()),
        };
        assert_eq!(params.names(), vec!["powers", "hero_powers"]);
        assert!(IncludeParams::default().names().is_empty());
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }
}
