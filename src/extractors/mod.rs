//! Request extractors whose rejections come back as `AppError` JSON bodies.

mod json;
mod query;

pub use json::ApiJson;
pub use query::ApiQuery;
