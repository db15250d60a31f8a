//! Product Service - search orchestration and catalogue writes
//!
//! The document store is authoritative. The vector index is kept in step on a
//! best-effort basis: index failures during writes are logged as drift and
//! never fail the write, while failures during reads surface to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use domain_vector::{EmbeddingProvider, VectorIndex};
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    recommendation_query, BulkInsertResult, BulkItemError, BulkItemSuccess, CreateProduct, Product,
    UpdateProduct,
};
use crate::repository::ProductRepository;

/// Product service composing the store, the embedding model and the vector index
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(
        repository: R,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            embedder,
            index,
        }
    }

    /// Semantic search: products most similar to `query`, most relevant first.
    ///
    /// Never returns more than `limit` products; ids the index knows but the
    /// store does not are dropped rather than padded.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> ProductResult<Vec<Product>> {
        if query.trim().is_empty() {
            return Err(ProductError::Validation(
                "Search query is required".to_string(),
            ));
        }

        let vector = self.embedder.embed(query).await?;
        let matches = self.index.query(vector, limit).await?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = matches.into_iter().map(|m| m.id).collect();
        let mut by_id: HashMap<Uuid, Product> = self
            .repository
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.remove(&id) {
                Some(product) => ordered.push(product),
                None => warn!(
                    product_id = %id,
                    operation = "search",
                    "Index entry has no stored product"
                ),
            }
        }
        ordered.truncate(limit);

        Ok(ordered)
    }

    /// Recommendations for an optional effect and product type
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        effect: Option<&str>,
        product_type: Option<&str>,
        limit: usize,
    ) -> ProductResult<Vec<Product>> {
        let query = recommendation_query(effect, product_type);
        self.search(&query, limit).await
    }

    /// Validate, persist, then index a product.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn add_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = self.repository.create(input).await?;
        self.sync_index(&product, "add").await;

        Ok(product)
    }

    /// Decode and insert each raw item independently, collecting a per-item outcome
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn add_products(
        &self,
        items: Vec<serde_json::Value>,
    ) -> ProductResult<BulkInsertResult> {
        if items.is_empty() {
            return Err(ProductError::Validation(
                "No valid products provided".to_string(),
            ));
        }

        let mut results = Vec::new();
        let mut errors = Vec::new();

        for item in items {
            let input = match CreateProduct::from_item(item) {
                Ok(input) => input,
                Err(e) => {
                    warn!(product_name = %e.name, error = %e.error, "Skipping malformed product");
                    errors.push(e);
                    continue;
                }
            };
            let name = input.name.clone();
            match self.add_product(input).await {
                Ok(product) => results.push(BulkItemSuccess {
                    id: product.id,
                    name: product.name,
                    status: "success".to_string(),
                }),
                Err(e) => {
                    warn!(product_name = %name, error = %e, "Failed to add product");
                    errors.push(BulkItemError {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(BulkInsertResult::new(results, errors))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// All products, newest first
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Update the stored product, then re-index it.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = self
            .repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        self.sync_index(&product, "update").await;

        Ok(product)
    }

    /// Delete the stored product, then its index entry.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        if let Err(e) = self.index.delete(id).await {
            warn!(
                product_id = %id,
                operation = "delete",
                error = %e,
                "Vector index out of sync with product store"
            );
        }

        Ok(())
    }

    /// Embed and upsert `product`; failures are logged as drift.
    async fn sync_index(&self, product: &Product, operation: &'static str) {
        let result = async {
            let vector = self.embedder.embed(&product.embedding_text()).await?;
            self.index
                .upsert(product.id, vector, product.vector_metadata())
                .await
        }
        .await;

        if let Err(e) = result {
            warn!(
                product_id = %product.id,
                operation,
                error = %e,
                "Vector index out of sync with product store"
            );
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            embedder: Arc::clone(&self.embedder),
            index: Arc::clone(&self.index),
        }
    }
}
