use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::models::EmbeddingModel;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: EmbeddingModel,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: EmbeddingModel::default(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        let base_url = env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL);
        let model = env_parse_or_default("EMBEDDING_MODEL", EmbeddingModel::default())?;
        let timeout_secs = env_parse_or_default("OPENAI_TIMEOUT_SECS", 30)?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout_secs,
        })
    }
}

/// OpenAI embeddings provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> VectorResult<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn model(&self) -> EmbeddingModel {
        self.config.model
    }

    #[instrument(skip(self, text), fields(model = %self.config.model, chars = text.len()))]
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(VectorError::Validation(
                "text to embed must not be empty".to_string(),
            ));
        }

        let request = EmbeddingRequest {
            model: self.config.model.model_name(),
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VectorError::EmbeddingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorError::EmbeddingUnavailable(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| VectorError::EmbeddingUnavailable(e.to_string()))?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| VectorError::EmbeddingUnavailable("No embedding returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    async fn fake_openai(data: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route(
                "/embeddings",
                post(
                    |State((captured, data)): State<(Captured, Value)>,
                     headers: axum::http::HeaderMap,
                     Json(body): Json<Value>| async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.lock().unwrap().push((auth, body));
                        Json(json!({ "data": data, "usage": { "prompt_tokens": 3, "total_tokens": 3 } }))
                    },
                ),
            )
            .with_state((captured.clone(), data));
        (spawn(router).await, captured)
    }

    fn provider(base_url: String) -> OpenAIProvider {
        OpenAIProvider::new(
            OpenAIConfig::new("sk-test".to_string())
                .with_base_url(base_url)
                .with_timeout_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_embed_returns_first_vector() {
        let (url, captured) =
            fake_openai(json!([{ "embedding": [0.1, 0.2, 0.3], "index": 0 }])).await;

        let vector = provider(url).embed("calming tea").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);

        let calls = captured.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_deref(), Some("Bearer sk-test"));
        assert_eq!(calls[0].1["model"], "text-embedding-3-small");
        assert_eq!(calls[0].1["input"], "calming tea");
    }

    #[tokio::test]
    async fn test_blank_text_makes_no_call() {
        let (url, captured) = fake_openai(json!([])).await;

        let err = provider(url).embed("   \n").await.unwrap_err();
        assert!(matches!(err, VectorError::Validation(_)));
        assert!(captured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_data_is_unavailable() {
        let (url, _) = fake_openai(json!([])).await;

        let err = provider(url).embed("sleep aid").await.unwrap_err();
        assert!(matches!(err, VectorError::EmbeddingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let router = Router::new().route(
            "/embeddings",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let url = spawn(router).await;

        let err = provider(url).embed("energy").await.unwrap_err();
        assert!(matches!(err, VectorError::EmbeddingUnavailable(msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = provider(url).embed("focus").await.unwrap_err();
        assert!(matches!(err, VectorError::EmbeddingUnavailable(_)));
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-env")),
                ("OPENAI_BASE_URL", Some("http://localhost:9999/v1/")),
                ("EMBEDDING_MODEL", Some("text-embedding-3-large")),
                ("OPENAI_TIMEOUT_SECS", None),
            ],
            || {
                let config = OpenAIConfig::from_env().unwrap();
                assert_eq!(config.api_key, "sk-env");
                assert_eq!(config.base_url, "http://localhost:9999/v1");
                assert_eq!(config.model, EmbeddingModel::TextEmbedding3Large);
                assert_eq!(config.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn test_config_requires_api_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            assert!(matches!(
                OpenAIConfig::from_env(),
                Err(ConfigError::MissingEnvVar(key)) if key == "OPENAI_API_KEY"
            ));
        });
    }

    #[test]
    fn test_config_rejects_unknown_model() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-env")),
                ("EMBEDDING_MODEL", Some("word2vec")),
            ],
            || {
                assert!(matches!(
                    OpenAIConfig::from_env(),
                    Err(ConfigError::ParseError { .. })
                ));
            },
        );
    }
}
