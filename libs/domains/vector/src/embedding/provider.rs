use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::EmbeddingModel;

/// Turns text into a fixed-dimension vector.
///
/// Implementations reject blank input with `VectorError::Validation` without
/// calling out, and report every remote failure as
/// `VectorError::EmbeddingUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model used for every call; fixes the vector dimension
    fn model(&self) -> EmbeddingModel;

    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;
}
