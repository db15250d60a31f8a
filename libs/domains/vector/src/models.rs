use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Supported OpenAI embedding models.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum EmbeddingModel {
    /// 1536 dimensions
    #[default]
    #[strum(serialize = "text-embedding-3-small")]
    #[serde(rename = "text-embedding-3-small")]
    TextEmbedding3Small,
    /// 3072 dimensions
    #[strum(serialize = "text-embedding-3-large")]
    #[serde(rename = "text-embedding-3-large")]
    TextEmbedding3Large,
    /// 1536 dimensions, legacy
    #[strum(serialize = "text-embedding-ada-002")]
    #[serde(rename = "text-embedding-ada-002")]
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
        }
    }

    pub fn model_name(&self) -> &str {
        self.as_ref()
    }
}

/// One nearest-neighbour hit, ordered by descending score in query results.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMatch {
    pub id: Uuid,
    pub score: f32,
}

/// Denormalized product fields stored next to each vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Comma-joined list
    pub effects: String,
    /// Comma-joined list
    pub ingredients: String,
    #[serde(rename = "productId")]
    pub product_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_model_names_round_trip() {
        for model in [
            EmbeddingModel::TextEmbedding3Small,
            EmbeddingModel::TextEmbedding3Large,
            EmbeddingModel::TextEmbeddingAda002,
        ] {
            assert_eq!(EmbeddingModel::from_str(model.model_name()).unwrap(), model);
        }
        assert!(EmbeddingModel::from_str("word2vec").is_err());
    }

    #[test]
    fn test_model_dimensions() {
        assert_eq!(EmbeddingModel::default().dimension(), 1536);
        assert_eq!(EmbeddingModel::TextEmbedding3Large.dimension(), 3072);
    }

    #[test]
    fn test_metadata_wire_names() {
        let metadata = VectorMetadata {
            name: "Calm Tea".into(),
            product_type: "tea".into(),
            effects: "calm,sleep".into(),
            ingredients: "chamomile".into(),
            product_id: "0192".into(),
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["type"], "tea");
        assert_eq!(json["productId"], "0192");
    }
}
