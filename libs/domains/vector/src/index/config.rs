use core_config::{ConfigError, FromEnv, env_parse_or_default};
use strum::{Display, EnumString};

use super::{PineconeConfig, QdrantConfig};

/// Backend selected by `VECTOR_INDEX_PROVIDER`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IndexProvider {
    #[default]
    Pinecone,
    Qdrant,
}

/// Connection settings for whichever backend is selected.
#[derive(Debug, Clone)]
pub enum VectorIndexConfig {
    Pinecone(PineconeConfig),
    Qdrant(QdrantConfig),
}

impl VectorIndexConfig {
    pub fn provider(&self) -> IndexProvider {
        match self {
            VectorIndexConfig::Pinecone(_) => IndexProvider::Pinecone,
            VectorIndexConfig::Qdrant(_) => IndexProvider::Qdrant,
        }
    }
}

impl FromEnv for VectorIndexConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env_parse_or_default("VECTOR_INDEX_PROVIDER", IndexProvider::default())? {
            IndexProvider::Pinecone => Ok(Self::Pinecone(PineconeConfig::from_env()?)),
            IndexProvider::Qdrant => Ok(Self::Qdrant(QdrantConfig::from_env()?)),
        }
    }
}
