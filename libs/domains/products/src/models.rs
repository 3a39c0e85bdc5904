use chrono::{DateTime, Utc};
use field_selector::SelectableFields;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product entity - represents a product stored in MongoDB
///
/// Wire JSON is camelCase; the identifier is stored as `_id` and rendered
/// as `id` by the field-selector externalization step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product price
    pub price: f64,
    /// Optional category
    pub category: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub image: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// DTO for partially updating an existing product.
///
/// The nullable fields use a double `Option` so an explicit `null` in the
/// body (clear the field) is distinguishable from the field being absent
/// (leave it alone).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl UpdateProduct {
    /// True when no recognized field is present in the body
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Filter by exact category
    pub category: Option<String>,
    /// Inclusive lower bound on price
    pub min_price: Option<f64>,
    /// Sort order; only "price" (ascending) is recognized
    pub sort: Option<String>,
}

impl ProductFilter {
    /// Whether ascending price sorting was requested
    pub fn sort_by_price(&self) -> bool {
        self.sort.as_deref() == Some("price")
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            category: input.category,
            description: input.description,
            image: input.image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SelectableFields for Product {
    fn available_fields() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "price",
            "category",
            "description",
            "image",
            "createdAt",
            "updatedAt",
        ]
    }
}

/// Deserialize a field so that explicit `null` becomes `Some(None)` while an
/// absent field stays `None` (via `#[serde(default)]`).
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
