use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct, ScoredPoint,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
    point_id::PointIdOptions, value::Kind,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::VectorIndex;
use crate::error::{VectorError, VectorResult};
use crate::models::{IndexMatch, VectorMetadata};

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            collection: "products".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FromEnv for QdrantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("QDRANT_URL", "http://localhost:6334"),
            api_key: std::env::var("QDRANT_API_KEY").ok().filter(|k| !k.is_empty()),
            collection: env_or_default("QDRANT_COLLECTION", "products"),
            timeout_secs: env_parse_or_default("QDRANT_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Qdrant collection used as the product vector index
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
}

impl QdrantIndex {
    pub fn new(config: QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        let client = builder
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Config(format!("Failed to build Qdrant client: {}", e)))?;

        Ok(Self {
            client,
            collection: config.collection,
        })
    }

    /// Create the collection with cosine distance if it does not exist yet.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn ensure_collection(&self, dimension: u32) -> VectorResult<()> {
        if self.client.collection_exists(&self.collection).await? {
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dimension as u64, Distance::Cosine)),
            )
            .await?;

        info!(dimension, "Created Qdrant collection");
        Ok(())
    }
}

fn metadata_payload(metadata: VectorMetadata) -> HashMap<String, QdrantValue> {
    HashMap::from([
        ("name".to_string(), QdrantValue::from(metadata.name)),
        ("type".to_string(), QdrantValue::from(metadata.product_type)),
        ("effects".to_string(), QdrantValue::from(metadata.effects)),
        ("ingredients".to_string(), QdrantValue::from(metadata.ingredients)),
        ("productId".to_string(), QdrantValue::from(metadata.product_id)),
    ])
}

/// `productId` payload wins over the point id.
fn scored_point_id(point: &ScoredPoint) -> Option<Uuid> {
    let from_payload = point.payload.get("productId").and_then(|v| match &v.kind {
        Some(Kind::StringValue(s)) => Uuid::parse_str(s).ok(),
        _ => None,
    });

    from_payload.or_else(|| match point.id.as_ref().and_then(|id| id.point_id_options.as_ref()) {
        Some(PointIdOptions::Uuid(s)) => Uuid::parse_str(s).ok(),
        _ => None,
    })
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    #[instrument(skip(self, vector, metadata), fields(collection = %self.collection))]
    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        metadata: VectorMetadata,
    ) -> VectorResult<()> {
        let point = PointStruct::new(
            PointId::from(id.to_string()),
            vector,
            metadata_payload(metadata),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, vector), fields(collection = %self.collection))]
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> VectorResult<Vec<IndexMatch>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, top_k as u64).with_payload(true),
            )
            .await?;

        let mut matches: Vec<IndexMatch> = response
            .result
            .iter()
            .filter_map(|point| match scored_point_id(point) {
                Some(id) => Some(IndexMatch {
                    id,
                    score: point.score,
                }),
                None => {
                    warn!(point_id = ?point.id, "Skipping index match with unparsable product id");
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete(&self, id: Uuid) -> VectorResult<()> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(vec![PointId::from(id.to_string())])
                    .wait(true),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: Option<PointId>, payload: HashMap<String, QdrantValue>) -> ScoredPoint {
        ScoredPoint {
            id,
            payload,
            score: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_payload_uses_wire_names() {
        let payload = metadata_payload(VectorMetadata {
            name: "Focus Gummies".into(),
            product_type: "edible".into(),
            effects: "focus".into(),
            ingredients: "l-theanine".into(),
            product_id: "abc".into(),
        });

        assert!(payload.contains_key("type"));
        assert!(payload.contains_key("productId"));
        assert_eq!(
            payload.get("name").and_then(|v| v.kind.clone()),
            Some(Kind::StringValue("Focus Gummies".into()))
        );
    }

    #[test]
    fn test_point_id_prefers_payload() {
        let product = Uuid::now_v7();
        let point = scored(
            Some(PointId::from(Uuid::now_v7().to_string())),
            HashMap::from([("productId".to_string(), QdrantValue::from(product.to_string()))]),
        );
        assert_eq!(scored_point_id(&point), Some(product));
    }

    #[test]
    fn test_point_id_falls_back_to_uuid_id() {
        let product = Uuid::now_v7();
        let point = scored(Some(PointId::from(product.to_string())), HashMap::new());
        assert_eq!(scored_point_id(&point), Some(product));
    }

    #[test]
    fn test_numeric_point_id_is_skipped() {
        let point = scored(Some(PointId::from(7u64)), HashMap::new());
        assert_eq!(scored_point_id(&point), None);
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("QDRANT_URL", Some("http://qdrant:6334")),
                ("QDRANT_API_KEY", Some("")),
                ("QDRANT_COLLECTION", None),
                ("QDRANT_TIMEOUT_SECS", Some("10")),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url, "http://qdrant:6334");
                assert_eq!(config.api_key, None);
                assert_eq!(config.collection, "products");
                assert_eq!(config.timeout_secs, 10);
            },
        );
    }
}
