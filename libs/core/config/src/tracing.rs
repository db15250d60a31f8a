//! Logging setup shared by every binary in the workspace.

use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Crates whose spans and events make up the service's own logs.
const WORKSPACE_TARGETS: &[&str] = &[
    "recommender_api",
    "domain_products",
    "domain_vector",
    "domain_users",
    "domain_orders",
    "axum_helpers",
    "database",
];

/// Install color-eyre for `eyre::Report` output.
///
/// Shows the error location and hides the environment section. Later calls
/// are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// Workspace crates log at `info` in production and `debug` otherwise.
/// Dependencies stay one step quieter, with the Mongo driver's command
/// monitoring and the HTTP client kept at `warn`.
pub fn default_filter(environment: &Environment) -> String {
    let (own, deps) = if environment.is_production() {
        ("info", "warn")
    } else {
        ("debug", "info")
    };

    let mut directives = vec![deps.to_string()];
    directives.extend(WORKSPACE_TARGETS.iter().map(|t| format!("{}={}", t, own)));
    directives.push(format!("tower_http={}", own));
    directives.push("mongodb=warn".to_string());
    directives.push("reqwest=warn".to_string());
    directives.push("hyper=warn".to_string());
    directives.join(",")
}

/// Initialize the global subscriber with an `ErrorLayer` for span traces.
///
/// Production writes flattened JSON without targets; every other environment
/// gets the pretty formatter with targets. `RUST_LOG` overrides
/// [`default_filter`]. A second call leaves the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_production() {
        let filter = default_filter(&Environment::Production);
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("recommender_api=info"));
        assert!(filter.contains("domain_products=info"));
        assert!(filter.contains("mongodb=warn"));
    }

    #[test]
    fn test_default_filter_development() {
        let filter = default_filter(&Environment::Development);
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("domain_vector=debug"));
        assert!(filter.contains("tower_http=debug"));
    }

    #[test]
    fn test_default_filter_parses() {
        for env in [Environment::Development, Environment::Production] {
            assert!(EnvFilter::try_new(default_filter(&env)).is_ok());
        }
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_honours_rust_log() {
        temp_env::with_var("RUST_LOG", Some("domain_products=trace"), || {
            init_tracing(&Environment::Production);
        });
    }
}
