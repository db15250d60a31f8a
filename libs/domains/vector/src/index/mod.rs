mod config;
mod pinecone;
mod qdrant;

pub use config::{IndexProvider, VectorIndexConfig};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use qdrant::{QdrantConfig, QdrantIndex};

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::VectorResult;
use crate::models::{EmbeddingModel, IndexMatch, VectorMetadata};

/// Nearest-neighbour store keyed by product id.
///
/// Every remote failure surfaces as `VectorError::VectorIndexUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite the entry for `id`
    async fn upsert(&self, id: Uuid, vector: Vec<f32>, metadata: VectorMetadata)
    -> VectorResult<()>;

    /// Up to `top_k` matches ordered by descending score
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> VectorResult<Vec<IndexMatch>>;

    /// Remove the entry for `id`; absent ids are a no-op
    async fn delete(&self, id: Uuid) -> VectorResult<()>;
}

/// Build the configured index. Qdrant collections are created on first use.
pub async fn connect_index(
    config: VectorIndexConfig,
    model: EmbeddingModel,
) -> VectorResult<Arc<dyn VectorIndex>> {
    match config {
        VectorIndexConfig::Pinecone(pinecone) => {
            tracing::info!(host = %pinecone.index_host, namespace = %pinecone.namespace, "Using Pinecone vector index");
            Ok(Arc::new(PineconeIndex::new(pinecone)?))
        }
        VectorIndexConfig::Qdrant(qdrant) => {
            tracing::info!(url = %qdrant.url, collection = %qdrant.collection, "Using Qdrant vector index");
            let index = QdrantIndex::new(qdrant)?;
            index.ensure_collection(model.dimension()).await?;
            Ok(Arc::new(index))
        }
    }
}
