//! Handler tests for Orders domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{ErrorResponse, JwtAuth, JwtConfig};
use domain_orders::*;
use domain_products::{CreateProduct, InMemoryProductRepository, Product, ProductRepository};
use domain_users::{InMemoryUserRepository, User, UserRepository};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

struct Harness {
    app: Router,
    auth: JwtAuth,
    users: InMemoryUserRepository,
    products: InMemoryProductRepository,
    user: User,
}

async fn harness() -> Harness {
    let auth = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap());
    let users = InMemoryUserRepository::new();
    let products = InMemoryProductRepository::new();
    let user = users
        .create(User::new(
            "Jane".into(),
            "Doe".into(),
            "jane@example.com".into(),
            "hash".into(),
        ))
        .await
        .unwrap();

    let service = OrderService::new(users.clone(), products.clone());

    Harness {
        app: handlers::router(service, auth.clone()),
        auth,
        users,
        products,
        user,
    }
}

impl Harness {
    fn bearer_for(&self, user_id: Uuid) -> String {
        let token = self.auth.issue_token(user_id, "jane@example.com").unwrap();
        format!("Bearer {}", token)
    }

    async fn add_product(&self, name: &str) -> Product {
        self.products
            .create(CreateProduct {
                name: name.to_string(),
                product_type: "gummy".to_string(),
                description: "Chewable".to_string(),
                effects: vec!["sleep".to_string()],
                ingredients: vec!["melatonin".to_string()],
                price: 12.0,
                sales_data: None,
            })
            .await
            .unwrap()
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn checkout_request(bearer: Option<&str>, ids: &[Uuid]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/checkout")
        .header("content-type", "application/json");
    if let Some(bearer) = bearer {
        builder = builder.header("authorization", bearer);
    }
    builder
        .body(Body::from(json!({ "productIds": ids }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_checkout_requires_token() {
    let h = harness().await;

    let response = h
        .app
        .oneshot(checkout_request(None, &[Uuid::now_v7()]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "No token provided");
}

#[tokio::test]
async fn test_checkout_success() {
    let h = harness().await;
    let product = h.add_product("Sleep Gummies").await;
    let bearer = h.bearer_for(h.user.id);

    let response = h
        .app
        .oneshot(checkout_request(Some(&bearer), &[product.id]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Checkout successful");
    assert_eq!(body["purchasedProducts"][0]["name"], "Sleep Gummies");
    assert_eq!(body["purchasedProducts"][0]["id"], product.id.to_string());

    let stored = h.users.get_by_id(h.user.id).await.unwrap().unwrap();
    assert_eq!(stored.products_bought, vec![product.id]);
}

#[tokio::test]
async fn test_checkout_empty_is_400() {
    let h = harness().await;
    let bearer = h.bearer_for(h.user.id);

    let response = h
        .app
        .oneshot(checkout_request(Some(&bearer), &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "No products provided for checkout");
}

#[tokio::test]
async fn test_checkout_unknown_product_is_400() {
    let h = harness().await;
    let bearer = h.bearer_for(h.user.id);

    let response = h
        .app
        .oneshot(checkout_request(Some(&bearer), &[Uuid::now_v7()]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "One or more products not found");
}

#[tokio::test]
async fn test_checkout_with_non_uuid_id_is_400() {
    let h = harness().await;
    let product = h.add_product("Sleep Gummies").await;
    let bearer = h.bearer_for(h.user.id);

    let request = Request::builder()
        .method("POST")
        .uri("/checkout")
        .header("content-type", "application/json")
        .header("authorization", bearer)
        .body(Body::from(
            json!({ "productIds": [product.id, "abc123"] }).to_string(),
        ))
        .unwrap();

    let response = h.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "One or more products not found");
    let stored = h.users.get_by_id(h.user.id).await.unwrap().unwrap();
    assert!(stored.products_bought.is_empty());
}

#[tokio::test]
async fn test_checkout_with_malformed_body_renders_error_response() {
    let h = harness().await;
    let bearer = h.bearer_for(h.user.id);

    let request = Request::builder()
        .method("POST")
        .uri("/checkout")
        .header("content-type", "application/json")
        .header("authorization", bearer)
        .body(Body::from(json!({ "productIds": 42 }).to_string()))
        .unwrap();

    let response = h.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_checkout_for_deleted_user_is_404() {
    let h = harness().await;
    let product = h.add_product("Sleep Gummies").await;
    let bearer = h.bearer_for(Uuid::now_v7());

    let response = h
        .app
        .oneshot(checkout_request(Some(&bearer), &[product.id]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "User not found");
}

#[tokio::test]
async fn test_purchased_lists_bought_products() {
    let h = harness().await;
    let first = h.add_product("First").await;
    let second = h.add_product("Second").await;
    h.users
        .add_purchases(h.user.id, &[second.id, first.id])
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/purchased")
        .header("authorization", h.bearer_for(h.user.id))
        .body(Body::empty())
        .unwrap();

    let response = h.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: PurchasedResponse = json_body(response.into_body()).await;
    assert!(body.success);
    let names: Vec<&str> = body.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}
