//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("integrity: {0}")]
    Integrity(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialization: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// Status and machine-readable code for this error. Database errors are classified
    /// by constraint kind so a bad foreign key is a client error, not a 500.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Integrity(_) => (StatusCode::UNPROCESSABLE_ENTITY, "integrity_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Db(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Db(e) => match e.as_database_error() {
                Some(d) if d.is_foreign_key_violation() => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "integrity_error")
                }
                Some(d) if d.is_check_violation() => (StatusCode::BAD_REQUEST, "validation_error"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },
            AppError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Client-facing message: the detail without the variant prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Integrity(m)
            | AppError::BadRequest(m)
            | AppError::PayloadTooLarge(m) => m.clone(),
            AppError::Db(e) => e
                .as_database_error()
                .map(|d| d.message().to_string())
                .unwrap_or_else(|| e.to_string()),
            AppError::Config(e) => e.to_string(),
            AppError::Json(e) => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.message()
        };
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            AppError::NotFound("hero 1".into()).status_and_code(),
            (StatusCode::NOT_FOUND, "not_found")
        );
        assert_eq!(
            AppError::Validation("name is required".into()).status_and_code(),
            (StatusCode::BAD_REQUEST, "validation_error")
        );
        assert_eq!(
            AppError::Integrity("hero 9 does not exist".into()).status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "integrity_error")
        );
        assert_eq!(
            AppError::Db(sqlx::Error::RowNotFound).status_and_code().0,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn message_omits_the_variant_prefix() {
        let err = AppError::Validation("super_name is required".into());
        assert_eq!(err.to_string(), "validation: super_name is required");
        assert_eq!(err.message(), "super_name is required");
        assert_eq!(AppError::NotFound("hero 1".into()).message(), "hero 1");
    }

    #[test]
    fn config_errors_are_server_errors() {
        let err = AppError::from(ConfigError::Invalid {
            var: "DATABASE_URL",
            value: "sqlite://x.db?mode=bogus".into(),
            reason: "unknown mode".into(),
        });
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "config_error")
        );
    }

    #[test]
    fn pool_errors_are_server_errors() {
        let (status, code) = AppError::Db(sqlx::Error::PoolTimedOut).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "database_error");
    }
}
