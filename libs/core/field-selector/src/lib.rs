//! Field selector library for dynamic field selection in REST APIs.
//!
//! Supports the `?fields=name,price` query parameter: the requested list is
//! comma-split, entries are trimmed, empty entries discarded, and the result
//! is intersected with the entity's allow-list. The document identifier is
//! always included regardless of the request.
//!
//! The library also owns externalization: documents are stored with a
//! MongoDB-style `_id` key, while wire JSON exposes `id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

// Re-export for convenience
pub use serde;
pub use serde_json;

/// The identifier key exposed on the wire.
pub const ID_FIELD: &str = "id";

/// The identifier key used in storage.
const MONGO_ID_FIELD: &str = "_id";

/// Trait for DTOs that support field selection.
///
/// `available_fields` is the allow-list of externally visible field names;
/// anything not in it is silently dropped from a `fields=` request.
pub trait SelectableFields: Serialize {
    /// Get all selectable field names for this type (external names)
    fn available_fields() -> &'static [&'static str];
}

/// Errors that can occur during field selection
#[derive(Debug, thiserror::Error)]
pub enum FieldSelectionError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Query parameter extractor for field selection
/// Usage: GET /api/products?fields=name,price
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSelector {
    #[serde(default)]
    pub fields: Option<String>,
}

impl FieldSelector {
    /// Build a selector from a raw comma-separated list (mainly for tests)
    pub fn new(fields: impl Into<String>) -> Self {
        Self {
            fields: Some(fields.into()),
        }
    }

    /// Get the set of requested fields.
    ///
    /// `None` means the parameter was absent and every field is included.
    pub fn get_fields(&self) -> Option<HashSet<String>> {
        self.fields.as_ref().map(|f| {
            f.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }

    /// Resolve which external field names to include for `T`.
    ///
    /// The identifier is always part of the result.
    fn resolve_fields<T>(&self) -> Option<HashSet<String>>
    where
        T: SelectableFields,
    {
        let requested = self.get_fields()?;

        let mut allowed: HashSet<String> = T::available_fields()
            .iter()
            .filter(|f| requested.contains(**f))
            .map(|f| f.to_string())
            .collect();
        allowed.insert(ID_FIELD.to_string());

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                requested_fields = ?requested,
                selected_fields = ?allowed,
                "Field selection applied"
            );
        }

        Some(allowed)
    }

    /// Externalize and project a single document.
    pub fn project<T>(&self, value: &T) -> Result<Value, FieldSelectionError>
    where
        T: SelectableFields,
    {
        let fields = self.resolve_fields::<T>();
        let json_value = to_external(value)?;

        Ok(match (json_value, fields) {
            (Value::Object(obj), Some(ref fields)) => Value::Object(filter_object(obj, fields)),
            (value, _) => value,
        })
    }

    /// Externalize and project a list of documents.
    pub fn project_list<T>(&self, values: &[T]) -> Result<Value, FieldSelectionError>
    where
        T: SelectableFields,
    {
        let fields = self.resolve_fields::<T>();

        let projected: Result<Vec<Value>, _> = values
            .iter()
            .map(|v| {
                let json_value = to_external(v)?;
                Ok(match (json_value, &fields) {
                    (Value::Object(obj), Some(fields)) => Value::Object(filter_object(obj, fields)),
                    (value, _) => value,
                })
            })
            .collect();

        Ok(Value::Array(projected?))
    }
}

/// Serialize a document for the wire, renaming the storage `_id` key to `id`.
pub fn to_external<T: Serialize>(value: &T) -> Result<Value, FieldSelectionError> {
    let json_value = serde_json::to_value(value)
        .map_err(|e| FieldSelectionError::Serialization(e.to_string()))?;

    Ok(match json_value {
        Value::Object(mut obj) => {
            if let Some(id) = obj.remove(MONGO_ID_FIELD) {
                obj.insert(ID_FIELD.to_string(), id);
            }
            Value::Object(obj)
        }
        value => value,
    })
}

/// Helper function to filter a JSON object by field names
fn filter_object(obj: Map<String, Value>, fields: &HashSet<String>) -> Map<String, Value> {
    obj.into_iter()
        .filter(|(k, _)| fields.contains(k))
        .collect()
}
