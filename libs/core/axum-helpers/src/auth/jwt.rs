use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Default token lifetime: 7 days
pub const TOKEN_TTL: i64 = 7 * 24 * 60 * 60;

/// Claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    /// Parse the subject as a user id.
    pub fn user_uuid(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.user_id)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))
    }
}

/// Stateless HS256 token issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.expires_in_secs, "JWT auth initialized");
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(config.secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(config.secret.as_bytes())),
            ttl: Duration::seconds(config.expires_in_secs),
        }
    }

    /// Issue a token for the given user.
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> jsonwebtoken::errors::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> jsonwebtoken::errors::Result<JwtClaims> {
        let data = decode::<JwtClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
