//! HTTP handlers for signup and login

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, SignupRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(signup, login),
    components(
        schemas(SignupRequest, LoginRequest, AuthResponse),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Account signup and login")
    )
)]
pub struct ApiDoc;

/// Create the auth router
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(Arc::new(service))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User successfully registered.", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> UserResult<impl IntoResponse> {
    let session = service.signup(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User successfully registered.".to_string(),
            token: session.token,
        }),
    ))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let session = service.login(input).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token: session.token,
    }))
}
