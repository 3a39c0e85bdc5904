//! Business logic for items

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

/// Service layer sitting between handlers and the repository
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if input.is_empty() {
            return Err(ItemError::Validation(
                "Update must include at least one field".to_string(),
            ));
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ItemResult<()> {
        self.repository.delete(id).await
    }
}
