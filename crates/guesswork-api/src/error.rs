//! Guesswork — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guesswork_core::error::GameError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Engine or adapter construction failed.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `GameError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            GameError::InvalidOperation(_) => (StatusCode::CONFLICT, "invalid_operation"),
            GameError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error"),
            GameError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: GameError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_invalid_operation_maps_to_409() {
        assert_eq!(
            status_of(GameError::InvalidOperation("not now".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_persistence_maps_to_500() {
        assert_eq!(
            status_of(GameError::Persistence("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_configuration_maps_to_500() {
        assert_eq!(
            status_of(GameError::Configuration("no personas".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
