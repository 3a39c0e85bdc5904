//! Deferred-readiness handle for the MongoDB database.
//!
//! The HTTP layer is wired up before the connection sequence completes, so
//! repositories cannot hold a `Database` directly. A [`Store`] is handed to
//! them instead: a cheaply cloneable, set-once cell that the startup task
//! fills in exactly once after the connection succeeds. Until then every
//! access reports [`StoreError::NotReady`] instead of blocking or panicking.

use mongodb::{Collection, Database};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Error returned when the store is accessed before initialization completed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection not ready")]
    NotReady,
}

/// Set-once handle to the connected MongoDB database.
///
/// Clones share the same underlying cell, so a clone given to the router
/// before startup finishes becomes usable the moment the startup task calls
/// [`Store::set`].
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<OnceLock<Database>>,
}

impl Store {
    /// Create an empty, not-yet-ready store handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is ready immediately (mainly for tests)
    pub fn ready(db: Database) -> Self {
        let store = Self::new();
        store.set(db);
        store
    }

    /// Publish the connected database.
    ///
    /// Only the first call wins; later calls are ignored. Returns whether
    /// this call performed the initialization.
    pub fn set(&self, db: Database) -> bool {
        let installed = self.inner.set(db).is_ok();
        if installed {
            info!("Database handle published, store is ready");
        }
        installed
    }

    /// Whether the connection sequence has completed
    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Get the database, or report that the store is not ready yet
    pub fn database(&self) -> Result<&Database, StoreError> {
        self.inner.get().ok_or(StoreError::NotReady)
    }

    /// Resolve a typed collection handle
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Result<Collection<T>, StoreError> {
        Ok(self.database()?.collection::<T>(name))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("ready", &self.is_ready())
            .finish()
    }
}
