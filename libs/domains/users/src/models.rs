use chrono::{DateTime, Utc};
use database::mongodb::{serde_timestamp, serde_uuid};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User document as stored in the `users` collection.
///
/// Never returned from the API as-is; see [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", with = "serde_uuid")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercased; unique
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default, with = "serde_uuid::vec")]
    pub cart: Vec<Uuid>,
    /// Purchased product ids in purchase order, without repeats
    #[serde(default, with = "serde_uuid::vec")]
    pub products_bought: Vec<Uuid>,
    #[serde(with = "serde_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user. The caller has already hashed the password.
    pub fn new(first_name: String, last_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name,
            last_name,
            email: normalize_email(&email),
            password_hash,
            cart: Vec::new(),
            products_bought: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set-union `product_ids` into `products_bought` and empty the cart.
    pub fn record_purchases(&mut self, product_ids: &[Uuid]) {
        for id in product_ids {
            if !self.products_bought.contains(id) {
                self.products_bought.push(*id);
            }
        }
        self.cart.clear();
        self.updated_at = Utc::now();
    }
}

/// Public view of a user (no password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Trim and lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// DTO for `POST /auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// DTO for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful signup or login: the user and a fresh bearer token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserResponse,
    pub token: String,
}

/// `{ message, token }` body returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}
