//! Schema bootstrap.
//!
//! Stores apply their DDL once when opened. The script is either the
//! built-in one below or a file named in [`Config`](crate::Config).

use crate::error::StoreError;
use crate::{Error, Result};
use sqlx::sqlite::SqlitePool;
use std::path::Path;

/// Built-in DDL for the articles table
pub const ARTICLES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL
);
"#;

/// Built-in DDL for the words table
pub const WORDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT NOT NULL
);
"#;

/// Apply `script` if given, otherwise `builtin`, inside one transaction
pub async fn bootstrap(pool: &SqlitePool, script: Option<&Path>, builtin: &str) -> Result<()> {
    let sql = match script {
        Some(path) => {
            tracing::info!(path = %path.display(), "Applying schema script");
            tokio::fs::read_to_string(path).await.map_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "Failed to read schema script");
                Error::Store(StoreError::SchemaInitFailed(format!(
                    "Failed to read schema script {}: {}",
                    path.display(),
                    e
                )))
            })?
        }
        None => builtin.to_string(),
    };

    let mut tx = pool.begin().await.map_err(|e| {
        Error::Store(StoreError::SchemaInitFailed(format!(
            "Failed to begin transaction: {}",
            e
        )))
    })?;

    sqlx::raw_sql(&sql).execute(&mut *tx).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to apply schema");
        Error::Store(StoreError::SchemaInitFailed(format!(
            "Failed to apply schema: {}",
            e
        )))
    })?;

    tx.commit().await.map_err(|e| {
        Error::Store(StoreError::SchemaInitFailed(format!(
            "Failed to commit schema: {}",
            e
        )))
    })?;

    Ok(())
}
