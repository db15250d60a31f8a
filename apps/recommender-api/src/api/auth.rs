//! Auth API routes

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create auth router
pub fn router(state: &AppState) -> Router {
    let service = UserService::new(MongoUserRepository::new(&state.db), state.auth.clone());
    handlers::router(service)
}

/// Initialize the unique email index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
