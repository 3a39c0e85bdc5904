//! MongoDB implementation of ProductRepository

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

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
///
/// Holds the [`Store`] handle rather than a live collection so a request
/// arriving before the connection completes gets a clean "not ready" error.
pub struct MongoProductRepository {
    store: Store,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository over the given store handle
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolve the products collection, or fail with "not ready"
    fn collection(&self) -> ProductResult<Collection<Product>> {
        Ok(self.store.collection::<Product>(COLLECTION)?)
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        if let Some(min_price) = filter.min_price {
            doc.insert("price", doc! { "$gte": min_price });
        }

        doc
    }

    /// Build a `$set` document from the fields present in UpdateProduct.
    ///
    /// `Some(None)` on a nullable field stores an explicit BSON null;
    /// absent fields are left untouched. `updatedAt` is always refreshed.
    fn build_update(input: &UpdateProduct) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(ref category) = input.category {
            set.insert("category", nullable_bson(category));
        }
        if let Some(ref description) = input.description {
            set.insert("description", nullable_bson(description));
        }
        if let Some(ref image) = input.image {
            set.insert("image", nullable_bson(image));
        }

        set.insert(
            "updatedAt",
            to_bson(&Utc::now()).unwrap_or(Bson::Null),
        );

        set
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

fn nullable_bson(field: &Option<String>) -> Bson {
    match field {
        Some(text) => Bson::String(text.clone()),
        None => Bson::Null,
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection()?.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection()?.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let collection = self.collection()?;
        let mut find = collection.find(mongo_filter);
        if filter.sort_by_price() {
            find = find.sort(doc! { "price": 1 });
        }

        let cursor = find.await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let update = doc! { "$set": Self::build_update(&input) };

        let updated = self
            .collection()?
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let result = self.collection()?.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }
}
