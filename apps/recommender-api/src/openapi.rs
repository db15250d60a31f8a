//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the Recommender API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recommender API",
        version = "0.1.0",
        description = "Product catalogue with semantic search, recommendations and checkout",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    modifiers(&BearerAuth),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/orders", api = domain_orders::ApiDoc),
        (path = "/auth", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/products",
            "/products/search",
            "/products/recommendations",
            "/products/bulk-upload",
            "/products/{id}",
            "/orders/checkout",
            "/orders/purchased",
            "/auth/signup",
            "/auth/login",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected} in {paths:?}"
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
    }
}
