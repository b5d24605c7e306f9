//! Buffered batch writer for generated articles.
//!
//! Articles passed to [`ArticleStore::save`] are held in memory and written
//! to SQLite in batches of `batch_size`. Each batch is one transaction; the
//! identifier of every row is read back with `RETURNING id` as it is
//! inserted, so the i-th key always belongs to the i-th buffered article.

use crate::config::Config;
use crate::error::{FlushError, StoreError};
use crate::types::Article;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{ArticleRow, Store, connect, schema};

/// Buffered article store
///
/// Owns a single SQLite connection from construction until [`close`].
/// Not meant to be shared between writers: `save` and `flush` take
/// `&mut self`.
///
/// [`close`]: ArticleStore::close
pub struct ArticleStore {
    pool: SqlitePool,
    buffer: Vec<Article>,
    batch_size: usize,
}

impl ArticleStore {
    /// Connect to `config.database_url`, bootstrap the articles table and
    /// build a store with `config.batch_size`.
    pub async fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        tracing::info!(url = %config.database_url, "Opening article store");

        let pool = connect(&config.database_url).await?;
        if let Err(e) =
            schema::bootstrap(&pool, config.articles_script.as_deref(), schema::ARTICLES_SCHEMA)
                .await
        {
            pool.close().await;
            return Err(e);
        }

        Self::with_pool(pool, config.batch_size)
    }

    /// Build a store over a pool whose schema is already in place
    ///
    /// Fails with [`Error::Config`] if `batch_size` is 0, matching
    /// [`Config::validate`].
    pub fn with_pool(pool: SqlitePool, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config {
                message: "batch_size must be at least 1".to_string(),
                key: Some("batch_size".to_string()),
            });
        }
        Ok(Self {
            pool,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
        })
    }

    /// Buffer an article, flushing first if the buffer is full
    ///
    /// Returns the same handle; its identifier becomes visible once the
    /// batch containing it is flushed. Articles that already carry an
    /// identifier, or are already waiting in the buffer, are rejected.
    pub async fn save(&mut self, article: Article) -> Result<Article> {
        if let Some(id) = article.id() {
            return Err(Error::Store(StoreError::WriteFailed(format!(
                "Article {} is already persisted",
                id
            ))));
        }

        if self.buffer.iter().any(|a| a.same_record(&article)) {
            return Err(Error::Store(StoreError::WriteFailed(
                "Article is already buffered".to_string(),
            )));
        }

        self.buffer.push(article.clone());
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(article)
    }

    /// Write every buffered article in one transaction
    ///
    /// Does nothing (and touches no connection) when the buffer is empty.
    /// On error the transaction is rolled back and the buffer is left as it
    /// was.
    pub async fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let ids = match self.insert_batch().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    buffered = self.buffer.len(),
                    "Batch insert of articles failed"
                );
                return Err(Error::Flush(e));
            }
        };

        for (article, id) in self.buffer.iter().zip(ids) {
            if !article.assign_id(id) {
                tracing::warn!(id, "Article was already assigned an identifier");
            }
        }

        tracing::debug!(count = self.buffer.len(), "Flushed article batch");
        self.buffer.clear();
        Ok(())
    }

    /// Insert the buffer in order, returning the generated keys positionally
    async fn insert_batch(&self) -> std::result::Result<Vec<i64>, FlushError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| FlushError::from_sqlx(&e))?;

        let mut ids = Vec::with_capacity(self.buffer.len());
        for article in &self.buffer {
            let id: Option<i64> =
                sqlx::query_scalar("INSERT INTO articles (text) VALUES (?) RETURNING id")
                    .bind(article.text())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| FlushError::from_sqlx(&e))?;
            if let Some(id) = id {
                ids.push(id);
            }
        }

        // Dropping the transaction on this path rolls it back
        if ids.len() < self.buffer.len() {
            return Err(FlushError::MissingKeys {
                submitted: self.buffer.len(),
                returned: ids.len(),
            });
        }

        tx.commit().await.map_err(|e| FlushError::from_sqlx(&e))?;
        Ok(ids)
    }

    /// Read every persisted article ordered by identifier
    ///
    /// Buffered articles are not included.
    pub async fn find_all(&self) -> Result<Vec<Article>> {
        tracing::info!("Loading all articles");

        let rows = sqlx::query_as::<_, ArticleRow>("SELECT id, text FROM articles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load articles");
                Error::Store(StoreError::ReadFailed(format!(
                    "Failed to load articles: {}",
                    e
                )))
            })?;

        Ok(rows
            .into_iter()
            .map(|row| Article::persisted(row.id, row.text))
            .collect())
    }

    /// Flush whatever is still buffered, then release the connection
    ///
    /// The connection is released even if the final flush fails; the flush
    /// error is returned.
    pub async fn close(mut self) -> Result<()> {
        let result = self.flush().await;
        self.pool.close().await;
        tracing::info!("Article store closed");
        result
    }

    /// Number of articles waiting for the next flush
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Flush threshold
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Drop for ArticleStore {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            tracing::warn!(
                count = self.buffer.len(),
                "Article store dropped with unflushed articles"
            );
        }
    }
}

#[async_trait]
impl Store<Article> for ArticleStore {
    async fn save(&mut self, model: Article) -> Result<Article> {
        ArticleStore::save(self, model).await
    }

    async fn find_all(&self) -> Result<Vec<Article>> {
        ArticleStore::find_all(self).await
    }
}
