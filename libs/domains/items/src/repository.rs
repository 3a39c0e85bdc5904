use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, UpdateItem};

/// Repository trait for Item persistence
///
/// Implementations can use different storage backends (MongoDB, in-memory
/// for tests, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new item
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// List all items
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Partially update an existing item, returning the updated document
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item>;

    /// Delete an item by ID
    async fn delete(&self, id: Uuid) -> ItemResult<()>;
}
