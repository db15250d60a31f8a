//! Orders API routes

use axum::Router;
use domain_orders::{handlers, OrderService};
use domain_products::MongoProductRepository;
use domain_users::MongoUserRepository;

use crate::state::AppState;

/// Create orders router
pub fn router(state: &AppState) -> Router {
    let service = OrderService::new(
        MongoUserRepository::new(&state.db),
        MongoProductRepository::new(&state.db),
    );
    handlers::router(service, state.auth.clone())
}
