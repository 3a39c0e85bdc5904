//! Business logic for products

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer sitting between handlers and the repository
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if input.is_empty() {
            return Err(ProductError::Validation(
                "Update must include at least one field".to_string(),
            ));
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn create_input() -> CreateProduct {
        serde_json::from_str(r#"{"name": "Hammer", "price": 9.99}"#).unwrap()
    }

    #[tokio::test]
    async fn test_create_product() {
        let mut mock = MockProductRepository::new();
        mock.expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(Arc::new(mock));
        let product = service.create(create_input()).await.unwrap();

        assert_eq!(product.name, "Hammer");
        assert_eq!(product.price, 9.99);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let mock = MockProductRepository::new();
        let service = ProductService::new(Arc::new(mock));

        let input: CreateProduct =
            serde_json::from_str(r#"{"name": "", "price": 1.0}"#).unwrap();
        let result = service.create(input).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(Arc::new(mock));
        let result = service.get_by_id(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_payload() {
        let mock = MockProductRepository::new();
        let service = ProductService::new(Arc::new(mock));

        let result = service
            .update(Uuid::now_v7(), UpdateProduct::default())
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_with_explicit_null_is_not_empty() {
        let mut mock = MockProductRepository::new();
        mock.expect_update()
            .times(1)
            .returning(|_, _| Ok(Product::new(create_input())));

        let service = ProductService::new(Arc::new(mock));
        let input: UpdateProduct = serde_json::from_str(r#"{"category": null}"#).unwrap();

        assert!(service.update(Uuid::now_v7(), input).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_product() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete().times(1).returning(|_| Ok(()));

        let service = ProductService::new(Arc::new(mock));
        assert!(service.delete(Uuid::now_v7()).await.is_ok());
    }
}
