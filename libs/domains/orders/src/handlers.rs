//! HTTP handlers for Orders API

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse},
    jwt_auth_middleware, AppError, AppJson, JwtAuth, JwtClaims,
};
use domain_products::ProductRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CheckoutRequest, CheckoutResponse, PurchasedProduct, PurchasedResponse,
};
use crate::service::OrderService;

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(checkout, purchased),
    components(
        schemas(CheckoutRequest, CheckoutResponse, PurchasedProduct, PurchasedResponse),
        responses(NotFoundResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Orders", description = "Checkout and purchase history")
    )
)]
pub struct ApiDoc;

/// Create the orders router. Every route requires a bearer token.
pub fn router<U, P>(service: OrderService<U, P>, auth: JwtAuth) -> Router
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/checkout", post(checkout))
        .route("/purchased", get(purchased))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(Arc::new(service))
}

/// Buy the given products as the authenticated user
#[utoipa::path(
    post,
    path = "/checkout",
    tag = "Orders",
    request_body = CheckoutRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Checkout successful", body = CheckoutResponse),
        (status = 400, description = "Empty list or unknown product", body = axum_helpers::ErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn checkout<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<U, P>>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(request): AppJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let user_id = claims.user_uuid()?;
    let response = service.checkout(user_id, request.product_ids).await?;
    Ok(Json(response))
}

/// Products bought by the authenticated user
#[utoipa::path(
    get,
    path = "/purchased",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Purchase history", body = PurchasedResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn purchased<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<U, P>>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<PurchasedResponse>, AppError> {
    let user_id = claims.user_uuid()?;
    let products = service.purchased(user_id).await?;
    Ok(Json(PurchasedResponse {
        success: true,
        products,
    }))
}
