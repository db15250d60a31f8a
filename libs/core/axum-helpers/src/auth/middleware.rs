use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract the bearer token from the Authorization header, falling back to
/// an `access_token` cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie
                            .trim()
                            .strip_prefix("access_token=")
                            .map(str::to_string)
                    })
                })
        })
}

/// JWT authentication middleware.
///
/// Missing token answers 401 "No token provided"; a bad signature or an
/// expired token answers 401 "Invalid token". On success the decoded
/// [`JwtClaims`](super::JwtClaims) are inserted into request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("No bearer token on request");
        return AppError::Unauthorized("No token provided".to_string()).into_response();
    };

    let claims = match auth.verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return AppError::Unauthorized("Invalid token".to_string()).into_response();
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}
