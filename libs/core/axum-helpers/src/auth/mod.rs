//! Bearer-token authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 tokens
//! - [`jwt_auth_middleware`] guards routes and places [`JwtClaims`] in request extensions
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/orders/checkout", post(checkout))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL};
pub use middleware::jwt_auth_middleware;
