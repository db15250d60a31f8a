//! HTTP handlers for Products API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, AppJson, JwtAuth, UuidPath,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    BulkInsertResult, BulkItemError, BulkItemSuccess, CreateProduct, CreateProductsRequest,
    Product, RecommendationQuery, SalesData, SearchQuery, UpdateProduct, DEFAULT_RECOMMEND_LIMIT,
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// `{ products }` envelope for list and search
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// `{ recommendations }` envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Product>,
}

/// `{ product }` envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdatedResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDeletedResponse {
    pub message: String,
    #[serde(rename = "productId")]
    #[schema(value_type = String, format = Uuid)]
    pub product_id: Uuid,
}

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        search_products,
        get_recommendations,
        get_product,
        add_products,
        bulk_upload,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, SalesData, CreateProduct, UpdateProduct, CreateProductsRequest,
            BulkInsertResult, BulkItemSuccess, BulkItemError, ProductListResponse,
            RecommendationsResponse, ProductResponse, ProductUpdatedResponse,
            ProductDeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue and semantic search")
    )
)]
pub struct ApiDoc;

/// Create the products router. Write routes require a bearer token.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_products))
        .route("/search", get(search_products))
        .route("/recommendations", get(get_recommendations))
        .route("/{id}", get(get_product));

    let protected = Router::new()
        .route("/", post(add_products))
        .route("/bulk-upload", post(bulk_upload))
        .route("/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    public.merge(protected).with_state(shared_service)
}

fn clamp_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).min(MAX_SEARCH_LIMIT)
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.list_products().await?;
    Ok(Json(ProductListResponse { products }))
}

/// Semantic search over the catalogue
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products ordered by relevance", body = ProductListResponse),
        (status = 400, description = "Missing query", body = axum_helpers::ErrorResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<ProductListResponse>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ProductError::Validation("Search query is required".to_string()))?;

    let products = service
        .search(q, clamp_limit(query.limit, DEFAULT_SEARCH_LIMIT))
        .await?;
    Ok(Json(ProductListResponse { products }))
}

/// Recommendations for an optional effect and type
#[utoipa::path(
    get,
    path = "/recommendations",
    tag = "Products",
    params(RecommendationQuery),
    responses(
        (status = 200, description = "Recommended products", body = RecommendationsResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_recommendations<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<RecommendationQuery>,
) -> ProductResult<Json<RecommendationsResponse>> {
    let recommendations = service
        .recommend(
            query.effect.as_deref(),
            query.product_type.as_deref(),
            clamp_limit(query.limit, DEFAULT_RECOMMEND_LIMIT),
        )
        .await?;
    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse { product }))
}

/// Add products; each item is decoded, stored and indexed independently
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProductsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Per-item outcome", body = BulkInsertResult),
        (status = 400, description = "No products in body", body = axum_helpers::ErrorResponse),
        (status = 422, description = "Body is not a products envelope", body = axum_helpers::ErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(request): AppJson<CreateProductsRequest>,
) -> ProductResult<impl IntoResponse> {
    let result = service.add_products(request.products).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Bulk upload from a JSON document; same contract as `POST /products`
#[utoipa::path(
    post,
    path = "/bulk-upload",
    tag = "Products",
    request_body = CreateProductsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Per-item outcome", body = BulkInsertResult),
        (status = 400, description = "No products in body", body = axum_helpers::ErrorResponse),
        (status = 422, description = "Body is not a products envelope", body = axum_helpers::ErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn bulk_upload<R: ProductRepository>(
    state: State<Arc<ProductService<R>>>,
    body: AppJson<CreateProductsRequest>,
) -> ProductResult<impl IntoResponse> {
    add_products(state, body).await
}

/// Update a product and refresh its index entry
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated successfully", body = ProductUpdatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, description = "Body does not match UpdateProduct", body = axum_helpers::ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<UpdateProduct>,
) -> ProductResult<Json<ProductUpdatedResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductUpdatedResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Delete a product and its index entry
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted successfully", body = ProductDeletedResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductDeletedResponse>> {
    service.delete_product(id).await?;
    Ok(Json(ProductDeletedResponse {
        message: "Product deleted successfully".to_string(),
        product_id: id,
    }))
}
