//! In-memory [`DocumentStore`] implementation for tests and the
//! `memory` backend.
//!
//! Each collection is a `Vec` of documents behind one `std::sync::RwLock`,
//! which keeps insertion order and makes the uniqueness check and the
//! write a single critical section.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;

use crate::schema::CollectionSpec;

use super::{display_value, field_value, Document, DocumentStore, StoreError, StoreResult};

type Collections = HashMap<&'static str, Vec<Document>>;

/// In-memory store. Contents are lost when the process exits.
pub struct InMemoryStore {
    collections: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Backend(anyhow!("in-memory store lock poisoned")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Backend(anyhow!("in-memory store lock poisoned")))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// First unique-field collision between `body` and any document other
/// than `id`.
fn check_unique(
    spec: &CollectionSpec,
    docs: &[Document],
    id: &str,
    body: &Value,
) -> StoreResult<()> {
    for &field in spec.unique_fields {
        let value = match field_value(body, field) {
            Some(v) if !v.is_null() => v,
            _ => continue,
        };
        let holder = docs
            .iter()
            .find(|d| d.id != id && field_value(&d.body, field) == Some(value));
        if let Some(existing) = holder {
            return Err(StoreError::Duplicate {
                field,
                value: display_value(value),
                existing_id: existing.id.clone(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(
        &self,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreResult<()> {
        let mut all = self.write()?;
        let docs = all.entry(collection.name).or_default();
        if docs.iter().any(|d| d.id == id) {
            return Err(StoreError::Backend(anyhow!(
                "document {} already exists in {}",
                id,
                collection.name
            )));
        }
        check_unique(collection, docs, id, body)?;
        docs.push(Document {
            id: id.to_string(),
            body: body.clone(),
        });
        Ok(())
    }

    async fn replace(
        &self,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreResult<bool> {
        let mut all = self.write()?;
        let docs = match all.get_mut(collection.name) {
            Some(docs) => docs,
            None => return Ok(false),
        };
        let Some(pos) = docs.iter().position(|d| d.id == id) else {
            return Ok(false);
        };
        check_unique(collection, docs, id, body)?;
        docs[pos].body = body.clone();
        Ok(true)
    }

    async fn get(&self, collection: &CollectionSpec, id: &str) -> StoreResult<Option<Value>> {
        let all = self.read()?;
        Ok(all
            .get(collection.name)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(|d| d.body.clone()))
    }

    async fn list(&self, collection: &CollectionSpec) -> StoreResult<Vec<Document>> {
        let all = self.read()?;
        Ok(all.get(collection.name).cloned().unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &CollectionSpec,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let all = self.read()?;
        Ok(all
            .get(collection.name)
            .map(|docs| {
                docs.iter()
                    .filter(|d| field_value(&d.body, field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GRIPS, GRIP_GROUPS, HANDGUARDS};
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_get_list_in_order() {
        let store = InMemoryStore::new();
        store.insert(&GRIP_GROUPS, "b", &json!({ "name": "B" })).await.unwrap();
        store.insert(&GRIP_GROUPS, "a", &json!({ "name": "A" })).await.unwrap();

        let got = store.get(&GRIP_GROUPS, "a").await.unwrap().unwrap();
        assert_eq!(got["name"], "A");

        let ids: Vec<_> = store
            .list(&GRIP_GROUPS)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(store.list(&HANDGUARDS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_unique_field() {
        let store = InMemoryStore::new();
        store.insert(&GRIPS, "v1", &json!({ "upc": "123" })).await.unwrap();
        let err = store
            .insert(&GRIPS, "v2", &json!({ "upc": "123" }))
            .await
            .unwrap_err();
        match err {
            StoreError::Duplicate {
                field,
                value,
                existing_id,
            } => {
                assert_eq!(field, "upc");
                assert_eq!(value, "123");
                assert_eq!(existing_id, "v1");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(store.list(&GRIPS).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_uniqueness_is_per_collection() {
        let store = InMemoryStore::new();
        store.insert(&GRIPS, "v1", &json!({ "upc": "123" })).await.unwrap();
        store.insert(&HANDGUARDS, "v2", &json!({ "upc": "123" })).await.unwrap();
    }

    #[tokio::test]
    async fn test_replace_excludes_self_from_uniqueness() {
        let store = InMemoryStore::new();
        store.insert(&GRIPS, "v1", &json!({ "upc": "1" })).await.unwrap();
        store.insert(&GRIPS, "v2", &json!({ "upc": "2" })).await.unwrap();

        assert!(store
            .replace(&GRIPS, "v1", &json!({ "upc": "1", "images": ["a.jpg"] }))
            .await
            .unwrap());
        assert!(matches!(
            store.replace(&GRIPS, "v1", &json!({ "upc": "2" })).await,
            Err(StoreError::Duplicate { .. })
        ));
        assert!(!store.replace(&GRIPS, "missing", &json!({})).await.unwrap());

        let v1 = store.get(&GRIPS, "v1").await.unwrap().unwrap();
        assert_eq!(v1["upc"], "1");
        assert_eq!(v1["images"][0], "a.jpg");
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = InMemoryStore::new();
        store
            .insert(&GRIPS, "v1", &json!({ "groupId": "g1", "upc": "1" }))
            .await
            .unwrap();
        store
            .insert(&GRIPS, "v2", &json!({ "groupId": "g2", "upc": "2" }))
            .await
            .unwrap();
        store
            .insert(&GRIPS, "v3", &json!({ "groupId": "g1", "upc": "3" }))
            .await
            .unwrap();

        let found = store.find_by_field(&GRIPS, "groupId", &json!("g1")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
    }
}
