//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};

use super::jwt::TOKEN_TTL;

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_EXPIRES_IN_SECS` (optional) - token lifetime, defaults to 7 days
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub expires_in_secs: i64,
}

impl JwtConfig {
    /// Build a config from an explicit secret with the default lifetime.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            expires_in_secs: TOKEN_TTL,
        })
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;
        let expires_in_secs = env_parse_or_default("JWT_EXPIRES_IN_SECS", TOKEN_TTL)?;

        Ok(Self {
            secret,
            expires_in_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET).unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.expires_in_secs, TOKEN_TTL);
    }

    #[test]
    fn test_jwt_config_new_too_short() {
        assert!(JwtConfig::new("short").is_err());
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_EXPIRES_IN_SECS", None)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.expires_in_secs, 7 * 24 * 60 * 60);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_custom_lifetime() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_EXPIRES_IN_SECS", Some("3600")),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.expires_in_secs, 3600);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }
}
