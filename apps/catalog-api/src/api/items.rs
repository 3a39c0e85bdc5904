//! Items API routes
//!
//! Wires the items domain to HTTP routes.

use std::sync::Arc;

use axum::Router;
use domain_items::{ItemService, MongoItemRepository, handlers};

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    let repository = MongoItemRepository::new(state.store.clone());

    let service = ItemService::new(Arc::new(repository));

    handlers::router(service)
}
