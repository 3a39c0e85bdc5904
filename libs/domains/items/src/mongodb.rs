//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::Store;
use mongodb::{
    Collection,
    bson::{Bson, Document, doc, to_bson},
    options::ReturnDocument,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

const COLLECTION: &str = "items";

/// MongoDB implementation of the ItemRepository
///
/// Holds the [`Store`] handle rather than a live collection so a request
/// arriving before the connection completes gets a clean "not ready" error.
pub struct MongoItemRepository {
    store: Store,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository over the given store handle
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolve the items collection, or fail with "not ready"
    fn collection(&self) -> ItemResult<Collection<Item>> {
        Ok(self.store.collection::<Item>(COLLECTION)?)
    }

    /// Build a `$set` document from the fields present in UpdateItem.
    ///
    /// An explicit `null` value stores BSON null; an absent field is left
    /// untouched. `updatedAt` is always refreshed.
    fn build_update(input: &UpdateItem) -> ItemResult<Document> {
        let mut set = doc! {};

        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(ref value) = input.value {
            let bson = match value {
                Some(json) => to_bson(json)
                    .map_err(|e| ItemError::Internal(e.to_string()))?,
                None => Bson::Null,
            };
            set.insert("value", bson);
        }

        set.insert("updatedAt", to_bson(&Utc::now()).unwrap_or(Bson::Null));

        Ok(set)
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::new(input);

        self.collection()?.insert_one(&item).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let item = self.collection()?.find_one(Self::id_filter(id)).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection()?.find(doc! {}).await?;
        let items: Vec<Item> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let update = doc! { "$set": Self::build_update(&input)? };

        let updated = self
            .collection()?
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        tracing::info!(item_id = %id, "Item updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let result = self.collection()?.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }
}
