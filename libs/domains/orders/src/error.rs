use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use domain_users::UserError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::UserNotFound(_) => AppError::NotFound("User not found".to_string()),
            OrderError::User(err) => err.into(),
            OrderError::Product(err) => err.into(),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
