use chrono::{DateTime, Utc};
use field_selector::SelectableFields;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Item entity - a named record with a free-form JSON value payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Arbitrary JSON payload
    pub value: Option<Value>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

/// DTO for partially updating an existing item.
///
/// `value` uses a double `Option` so an explicit `null` (clear the payload)
/// is distinguishable from the field being absent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Value>)]
    pub value: Option<Option<Value>>,
}

impl UpdateItem {
    /// True when no recognized field is present in the body
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }
}

impl Item {
    /// Create a new item from CreateItem DTO
    pub fn new(input: CreateItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            value: input.value,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SelectableFields for Item {
    fn available_fields() -> &'static [&'static str] {
        &["id", "name", "value", "createdAt", "updatedAt"]
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new(CreateItem {
            name: "sensor-1".to_string(),
            value: None,
        });

        assert_eq!(item.created_at, item.updated_at);
        assert!(item.value.is_none());
        assert!(!item.id.is_nil());
    }

    #[test]
    fn test_value_accepts_arbitrary_json() {
        let input: CreateItem =
            serde_json::from_value(json!({ "name": "cfg", "value": { "nested": [1, 2] } }))
                .unwrap();
        assert_eq!(input.value, Some(json!({ "nested": [1, 2] })));
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: UpdateItem = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(update.value, Some(None));
        assert!(update.name.is_none());
        assert!(!update.is_empty());

        let update: UpdateItem = serde_json::from_str(r#"{"name": "renamed"}"#).unwrap();
        assert!(update.value.is_none());
    }

    #[test]
    fn test_update_with_no_recognized_fields_is_empty() {
        let update: UpdateItem = serde_json::from_str(r#"{"bogus": true}"#).unwrap();
        assert!(update.is_empty());
    }
}
