use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Message shown to clients whenever a search dependency is down
pub const SEARCH_UNAVAILABLE: &str = "Search is temporarily unavailable, please try again";

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding service unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Vector index unavailable: {0}")]
    VectorIndexUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type VectorResult<T> = Result<T, VectorError>;

impl From<core_config::ConfigError> for VectorError {
    fn from(err: core_config::ConfigError) -> Self {
        VectorError::Config(err.to_string())
    }
}

impl From<qdrant_client::QdrantError> for VectorError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        VectorError::VectorIndexUnavailable(err.to_string())
    }
}

/// Convert VectorError to AppError for standardized HTTP error responses
impl From<VectorError> for AppError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::Validation(msg) => AppError::BadRequest(msg),
            VectorError::EmbeddingUnavailable(msg) | VectorError::VectorIndexUnavailable(msg) => {
                tracing::warn!(cause = %msg, "search dependency unavailable");
                AppError::ServiceUnavailable(SEARCH_UNAVAILABLE.to_string())
            }
            VectorError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for VectorError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_unavailable_errors_map_to_503() {
        for err in [
            VectorError::EmbeddingUnavailable("timeout".into()),
            VectorError::VectorIndexUnavailable("502".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
        }
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = VectorError::Validation("text must not be empty".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
