//! Products API routes
//!
//! Wires the products domain to HTTP routes.

use std::sync::Arc;

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    // The repository holds the store handle, not a live connection
    let repository = MongoProductRepository::new(state.store.clone());

    let service = ProductService::new(Arc::new(repository));

    handlers::router(service)
}
