//! MongoDB connector and helpers

mod config;
mod connector;
mod health;
pub mod serde_timestamp;
pub mod serde_uuid;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
