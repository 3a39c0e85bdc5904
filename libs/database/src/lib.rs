//! Database library providing the MongoDB connector and utilities
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//! let collection = db.collection::<Document>("products");
//! ```
//!
//! With deferred readiness (the router is wired before the connection
//! completes, handlers see "not ready" until it does):
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, Store, connect_from_config_with_retry};
//!
//! let store = Store::new();
//! let handle = store.clone();
//! tokio::spawn(async move {
//!     let client = connect_from_config_with_retry(&config, None).await?;
//!     handle.set(client.database(config.database()));
//!     Ok::<_, MongoError>(())
//! });
//! ```

pub mod common;
pub mod mongodb;

// Re-exports for convenience
pub use common::{RetryConfig, retry, retry_with_backoff};
pub use mongodb::{MongoConfig, MongoError, Store, StoreError};
