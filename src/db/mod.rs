//! Database layer for article-gen
//!
//! Handles SQLite persistence for words and generated articles.
//!
//! ## Submodules
//!
//! - [`schema`] — Schema bootstrap from built-in or file-based DDL
//! - [`articles`] — [`ArticleStore`], the buffered batch writer
//! - [`words`] — [`WordStore`], the word pool

use crate::error::StoreError;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub mod articles;
pub mod schema;
pub mod words;

pub use articles::ArticleStore;
pub use words::WordStore;

/// Persistence seam shared by the word and article stores
#[async_trait]
pub trait Store<T>: Send {
    /// Persist (or schedule persisting) a record, returning it
    async fn save(&mut self, model: T) -> Result<T>;

    /// Read every persisted record
    async fn find_all(&self) -> Result<Vec<T>>;
}

/// Article row as stored in SQLite
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub text: String,
}

/// Open a single-connection pool for `url`
///
/// The pool never holds more than one connection and never recycles it, so a
/// store owns exactly one connection from construction until `close`. This
/// also keeps `sqlite::memory:` databases alive for the store's lifetime.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| {
            Error::Store(StoreError::ConnectionFailed(format!(
                "Failed to parse database url: {}",
                e
            )))
        })?
        .create_if_missing(true);

    // Create parent directory if it doesn't exist
    if let Some(parent) = options.get_filename().parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::Store(StoreError::ConnectionFailed(format!(
                "Failed to create database directory: {}",
                e
            )))
        })?;
    }

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            Error::Store(StoreError::ConnectionFailed(format!(
                "Failed to connect to database: {}",
                e
            )))
        })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
