//! Products Domain
//!
//! Catalogue storage plus semantic search and recommendations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────────────────────┐
//! │   Service   │ ──► │ EmbeddingProvider, VectorIndex │  (domain_vector)
//! └──────┬──────┘     └───────────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use domain_vector::{EmbeddingProvider, OpenAIProvider, VectorIndexConfig, connect_index};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("recommender");
//!
//! let embedder = Arc::new(OpenAIProvider::from_env()?);
//! let index = connect_index(VectorIndexConfig::from_env()?, embedder.model()).await?;
//!
//! let service = ProductService::new(MongoProductRepository::new(&db), embedder, index);
//! let router = handlers::router(service, JwtAuth::new(&JwtConfig::from_env()?));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    BulkInsertResult, BulkItemError, BulkItemSuccess, CreateProduct, CreateProductsRequest,
    Product, SalesData, UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
