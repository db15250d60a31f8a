//! Orders Domain
//!
//! Checkout and purchase history. Orders have no collection of their own:
//! a checkout appends to the buyer's `productsBought` through
//! [`domain_users::UserRepository::add_purchases`] after confirming every
//! product exists in [`domain_products::ProductRepository`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_orders::{handlers, OrderService};
//! use domain_products::InMemoryProductRepository;
//! use domain_users::InMemoryUserRepository;
//!
//! let auth = JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap());
//! let service = OrderService::new(InMemoryUserRepository::new(), InMemoryProductRepository::new());
//!
//! let router = handlers::router(service, auth);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CheckoutRequest, CheckoutResponse, PurchasedProduct, PurchasedResponse};
pub use service::OrderService;
