//! Items Domain
//!
//! Generic named records with a free-form JSON `value` payload, stored in
//! MongoDB. Follows the same handlers → service → repository → models layering
//! as the products domain.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{CreateItem, Item, UpdateItem};
pub use mongodb::MongoItemRepository;
pub use repository::ItemRepository;
pub use service::ItemService;
