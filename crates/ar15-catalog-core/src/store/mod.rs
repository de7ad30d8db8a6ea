//! Storage abstraction for the catalog.
//!
//! The [`DocumentStore`] trait is a small JSON document interface keyed by
//! collection and id. It knows nothing about grips or handguards: the
//! [`Catalog`](crate::Catalog) serializes its models to JSON and hands them
//! over together with the [`CollectionSpec`] that declares which fields
//! must be unique.
//!
//! Implementations must be `Send + Sync` to work with async runtimes, and
//! must enforce uniqueness atomically so concurrent writers cannot both
//! succeed with the same `name` or `upc`.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::CollectionSpec;

pub use memory::InMemoryStore;

/// A stored JSON document and its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field of the collection already holds `value`.
    #[error("duplicate value {value:?} for unique field {field} (held by {existing_id})")]
    Duplicate {
        field: &'static str,
        value: String,
        existing_id: String,
    },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract document storage.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert`](DocumentStore::insert) | Add a new document |
/// | [`replace`](DocumentStore::replace) | Overwrite an existing document |
/// | [`get`](DocumentStore::get) | Fetch one document by id |
/// | [`list`](DocumentStore::list) | All documents, in insertion order |
/// | [`find_by_field`](DocumentStore::find_by_field) | Documents whose field equals a value |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document.
    ///
    /// Fails with [`StoreError::Duplicate`] if any of the collection's
    /// unique fields collides with another document; nothing is written.
    async fn insert(&self, collection: &CollectionSpec, id: &str, body: &Value)
        -> StoreResult<()>;

    /// Replace the body of an existing document.
    ///
    /// Returns `false` when no document has this id. Uniqueness is checked
    /// against every document except the one being replaced.
    async fn replace(
        &self,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreResult<bool>;

    async fn get(&self, collection: &CollectionSpec, id: &str) -> StoreResult<Option<Value>>;

    async fn list(&self, collection: &CollectionSpec) -> StoreResult<Vec<Document>>;

    /// Documents whose dotted `field` equals `value`, in insertion order.
    async fn find_by_field(
        &self,
        collection: &CollectionSpec,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>>;
}

/// Resolves a dotted path (`compatibility.mountingSystem.type`) in a body.
pub fn field_value<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |node, key| node.get(key))
}

/// Renders a unique-field value for error messages.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_walks_nested_objects() {
        let body = json!({ "compatibility": { "mountingSystem": { "type": "M-LOK" } } });
        assert_eq!(
            field_value(&body, "compatibility.mountingSystem.type"),
            Some(&json!("M-LOK"))
        );
        assert_eq!(field_value(&body, "compatibility.railHeight"), None);
        assert_eq!(field_value(&body, "upc"), None);
    }

    #[test]
    fn test_display_value_unquotes_strings() {
        assert_eq!(display_value(&json!("873750002996")), "873750002996");
        assert_eq!(display_value(&json!(42)), "42");
    }
}
