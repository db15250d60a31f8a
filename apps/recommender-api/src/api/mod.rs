//! API routes module

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
        .nest("/auth", auth::router(state))
}

/// `/ready` with a real MongoDB round trip
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    tokio::try_join!(products::init_indexes(state), auth::init_indexes(state))?;
    Ok(())
}
