//! Embedding and vector index clients.
//!
//! ```text
//! text ──► EmbeddingProvider ──► Vec<f32> ──► VectorIndex ──► [(product id, score)]
//!          (OpenAI)                           (Pinecone REST | Qdrant)
//! ```
//!
//! Both collaborators are traits so the product service can take
//! `Arc<dyn EmbeddingProvider>` and `Arc<dyn VectorIndex>` and tests can swap
//! in mocks.
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vector::{
//!     EmbeddingProvider, OpenAIProvider, VectorIndex, VectorIndexConfig, connect_index,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = OpenAIProvider::from_env()?;
//! let index = connect_index(VectorIndexConfig::from_env()?, embedder.model()).await?;
//!
//! let vector = embedder.embed("something to help me sleep").await?;
//! let matches = index.query(vector, 10).await?;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod index;
pub mod models;

pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{SEARCH_UNAVAILABLE, VectorError, VectorResult};
pub use index::{
    IndexProvider, PineconeConfig, PineconeIndex, QdrantConfig, QdrantIndex, VectorIndex,
    VectorIndexConfig, connect_index,
};
pub use models::{EmbeddingModel, IndexMatch, VectorMetadata};
