//! API routes module
//!
//! Defines all HTTP API routes for the catalog API.

pub mod items;
pub mod meta;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all data routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/items", items::router(state))
}
