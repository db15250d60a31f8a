//! Server infrastructure.
//!
//! - Router assembly with OpenAPI documentation and cross-cutting layers
//! - Liveness and readiness helpers
//! - Graceful shutdown with a bounded cleanup phase
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes).await?
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(router, &config.server, async move { drop(client) }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
