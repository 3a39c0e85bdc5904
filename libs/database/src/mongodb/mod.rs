//! MongoDB database connector and utilities
//!
//! Provides connection management, a deferred-readiness store handle, and
//! MongoDB-specific helpers.

mod config;
mod connector;
mod health;
mod store;

pub use config::MongoConfig;
pub use connector::{
    MongoError, connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use store::{Store, StoreError};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
