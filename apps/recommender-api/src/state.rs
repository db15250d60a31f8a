//! Application state management

use std::sync::Arc;

use axum_helpers::JwtAuth;
use domain_vector::{EmbeddingProvider, VectorIndex};
use mongodb::{Client, Database};

/// Shared application state, built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
    pub auth: JwtAuth,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub index: Arc<dyn VectorIndex>,
}
