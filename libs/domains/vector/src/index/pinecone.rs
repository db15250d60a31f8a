use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::VectorIndex;
use crate::error::{VectorError, VectorResult};
use crate::models::{IndexMatch, VectorMetadata};

/// Pinecone data-plane configuration
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    /// Index host including scheme, e.g. `https://products-abc.svc.pinecone.io`
    pub index_host: String,
    pub namespace: String,
    pub timeout_secs: u64,
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>, index_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_host: normalize_host(&index_host.into()),
            namespace: "products".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("PINECONE_API_KEY")?,
            index_host: normalize_host(&env_required("PINECONE_INDEX_HOST")?),
            namespace: env_or_default("PINECONE_NAMESPACE", "products"),
            timeout_secs: env_parse_or_default("PINECONE_TIMEOUT_SECS", 30)?,
        })
    }
}

/// The console shows hosts without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Pinecone index accessed through its REST data plane
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<PineconeVector>,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
struct PineconeVector {
    id: String,
    values: Vec<f32>,
    metadata: VectorMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    namespace: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl PineconeMatch {
    /// `metadata.productId` wins over the vector id.
    fn product_id(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("productId"))
            .and_then(|v| v.as_str())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    ids: Vec<String>,
    namespace: &'a str,
}

impl PineconeIndex {
    pub fn new(config: PineconeConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> VectorResult<Self> {
        Self::new(PineconeConfig::from_env()?)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> VectorResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.config.index_host, path))
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| VectorError::VectorIndexUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorError::VectorIndexUnavailable(format!(
                "Pinecone API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VectorError::VectorIndexUnavailable(e.to_string()))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, vector, metadata), fields(dimension = vector.len()))]
    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        metadata: VectorMetadata,
    ) -> VectorResult<()> {
        let request = UpsertRequest {
            vectors: vec![PineconeVector {
                id: id.to_string(),
                values: vector,
                metadata,
            }],
            namespace: &self.config.namespace,
        };

        let _: serde_json::Value = self.post("/vectors/upsert", &request).await?;
        Ok(())
    }

    #[instrument(skip(self, vector))]
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> VectorResult<Vec<IndexMatch>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: &self.config.namespace,
        };

        let response: QueryResponse = self.post("/query", &request).await?;

        let mut matches: Vec<IndexMatch> = response
            .matches
            .iter()
            .filter_map(|m| match Uuid::parse_str(m.product_id()) {
                Ok(id) => Some(IndexMatch { id, score: m.score }),
                Err(_) => {
                    warn!(vector_id = %m.id, "Skipping index match with unparsable product id");
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> VectorResult<()> {
        let request = DeleteRequest {
            ids: vec![id.to_string()],
            namespace: &self.config.namespace,
        };

        let _: serde_json::Value = self.post("/vectors/delete", &request).await?;
        Ok(())
    }
}
