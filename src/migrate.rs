//! Schema migrations.
//!
//! All collections share one `documents` table keyed by `(collection, id)`
//! with the document body stored as JSON text. The unique constraints and
//! secondary indexes each [`CollectionSpec`] declares become partial
//! expression indexes over `json_extract(body, ...)`, restricted to that
//! collection's rows. Every statement is idempotent.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use ar15_catalog_core::schema::{all_collections, CollectionSpec};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::json_path;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Creates the documents table and every collection index on `pool`.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create documents table")?;

    for spec in all_collections() {
        for statement in index_statements(&spec)? {
            sqlx::query(&statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to create index: {}", statement))?;
        }
    }

    Ok(())
}

/// `CREATE INDEX` statements for one collection: unique fields first,
/// then secondary indexes.
pub fn index_statements(spec: &CollectionSpec) -> Result<Vec<String>> {
    let mut statements = Vec::new();

    for field in spec.unique_fields {
        statements.push(format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_{name}_{suffix} ON documents(json_extract(body, '{path}')) WHERE collection = '{name}'",
            name = spec.name,
            suffix = index_suffix(field),
            path = json_path(field)?,
        ));
    }

    for index in spec.indexes {
        statements.push(format!(
            "CREATE INDEX IF NOT EXISTS idx_{name}_{suffix} ON documents(json_extract(body, '{path}'){order}) WHERE collection = '{name}'",
            name = spec.name,
            suffix = index_suffix(index.field),
            path = json_path(index.field)?,
            order = if index.descending { " DESC" } else { "" },
        ));
    }

    Ok(statements)
}

fn index_suffix(field: &str) -> String {
    field.replace('.', "_")
}
