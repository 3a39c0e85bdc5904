//! Application state management.
//!
//! The state contains the loaded configuration and the shared [`Store`]
//! handle. The store starts empty and is filled in by the background
//! connection task, so the HTTP server can accept traffic immediately and
//! answer 503 until MongoDB is reachable.

use database::mongodb::Store;

/// Shared application state.
///
/// Cloning is inexpensive; the store is an Arc-backed handle whose clones
/// all observe the same readiness flip.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB readiness handle shared with the repositories
    pub store: Store,
}
