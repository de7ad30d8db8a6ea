//! SQLite-backed [`DocumentStore`] implementation.
//!
//! Documents live in the single `documents` table created by
//! [`migrate`](crate::migrate). Uniqueness is enforced by the partial
//! unique indexes, so the check and the write are one statement; when
//! SQLite reports a unique violation the conflicting document is looked
//! up to build [`StoreError::Duplicate`].

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use ar15_catalog_core::schema::CollectionSpec;
use ar15_catalog_core::store::{
    display_value, field_value, Document, DocumentStore, StoreError, StoreResult,
};

/// SQLite implementation of the [`DocumentStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Maps a failed write to [`StoreError::Duplicate`] when a unique index
    /// rejected it.
    async fn classify_write_error(
        &self,
        err: sqlx::Error,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreError {
        let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
        if !is_unique {
            return backend(err, collection);
        }

        for &field in collection.unique_fields {
            let value = match field_value(body, field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };
            match self.find_holder(collection, field, value, id).await {
                Ok(Some(existing_id)) => {
                    return StoreError::Duplicate {
                        field,
                        value: display_value(value),
                        existing_id,
                    }
                }
                Ok(None) => {}
                Err(e) => return e,
            }
        }
        // Primary key collision: the id itself is taken.
        backend(err, collection)
    }

    async fn find_holder(
        &self,
        collection: &CollectionSpec,
        field: &str,
        value: &Value,
        exclude_id: &str,
    ) -> StoreResult<Option<String>> {
        let sql = format!(
            "SELECT id FROM documents WHERE collection = ? AND json_extract(body, '{}') = json_extract(?, '$') AND id != ? LIMIT 1",
            json_path(field)?
        );
        let row = sqlx::query(&sql)
            .bind(collection.name)
            .bind(value.to_string())
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend(e, collection))?;
        Ok(row.map(|r| r.get("id")))
    }
}

/// Converts a dotted field name into a SQLite JSON path (`$.a.b`).
///
/// Only ASCII letters, digits, `_` and `.` are accepted because the path is
/// spliced into SQL so that expression indexes can match it.
pub(crate) fn json_path(field: &str) -> StoreResult<String> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid {
        return Err(StoreError::Backend(anyhow!(
            "invalid document field name: {:?}",
            field
        )));
    }
    Ok(format!("$.{}", field))
}

fn backend(err: sqlx::Error, collection: &CollectionSpec) -> StoreError {
    StoreError::Backend(anyhow::Error::new(err).context(format!(
        "SQLite operation on collection {} failed",
        collection.name
    )))
}

fn parse_body(collection: &CollectionSpec, id: &str, text: &str) -> StoreResult<Value> {
    serde_json::from_str(text)
        .with_context(|| format!("Invalid JSON body for {} in {}", id, collection.name))
        .map_err(StoreError::Backend)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(
        &self,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreResult<()> {
        let result = sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection.name)
            .bind(id)
            .bind(body.to_string())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(self.classify_write_error(e, collection, id, body).await),
        }
    }

    async fn replace(
        &self,
        collection: &CollectionSpec,
        id: &str,
        body: &Value,
    ) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(body.to_string())
            .bind(collection.name)
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) => Err(self.classify_write_error(e, collection, id, body).await),
        }
    }

    async fn get(&self, collection: &CollectionSpec, id: &str) -> StoreResult<Option<Value>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend(e, collection))?;

        match row {
            Some(row) => {
                let text: String = row.get("body");
                parse_body(collection, id, &text).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &CollectionSpec) -> StoreResult<Vec<Document>> {
        let rows =
            sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY rowid ASC")
                .bind(collection.name)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| backend(e, collection))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let text: String = row.get("body");
                let body = parse_body(collection, &id, &text)?;
                Ok(Document { id, body })
            })
            .collect()
    }

    async fn find_by_field(
        &self,
        collection: &CollectionSpec,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let sql = format!(
            "SELECT id, body FROM documents WHERE collection = ? AND json_extract(body, '{}') = json_extract(?, '$') ORDER BY rowid ASC",
            json_path(field)?
        );
        let rows = sqlx::query(&sql)
            .bind(collection.name)
            .bind(value.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| backend(e, collection))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let text: String = row.get("body");
                let body = parse_body(collection, &id, &text)?;
                Ok(Document { id, body })
            })
            .collect()
    }
}
