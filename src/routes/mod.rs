//! Router assembly.

mod common;
mod resources;

pub use common::common_routes;
pub use resources::resource_routes;

use crate::config::HttpConfig;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::Uri, Router};
use tower_http::trace::TraceLayer;

/// Full application: service routes, the three resources, a JSON 404 fallback,
/// request tracing and a body size limit enforced by the JSON extractor.
pub fn app(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(http.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}

async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
