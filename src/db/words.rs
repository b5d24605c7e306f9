//! Word pool operations.

use crate::config::Config;
use crate::error::StoreError;
use crate::types::Word;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{Store, connect, schema};

/// Store holding the pool of words articles are generated from
pub struct WordStore {
    pool: SqlitePool,
}

impl WordStore {
    /// Connect to `config.database_url` and bootstrap the words table
    pub async fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        tracing::info!(url = %config.database_url, "Opening word store");

        let pool = connect(&config.database_url).await?;
        if let Err(e) =
            schema::bootstrap(&pool, config.words_script.as_deref(), schema::WORDS_SCHEMA).await
        {
            pool.close().await;
            return Err(e);
        }

        Ok(Self::with_pool(pool))
    }

    /// Build a store over a pool whose schema is already in place
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single word, returning it with its generated identifier
    pub async fn save(&mut self, word: Word) -> Result<Word> {
        let id: i64 = sqlx::query_scalar("INSERT INTO words (value) VALUES (?) RETURNING id")
            .bind(&word.value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to insert word");
                Error::Store(StoreError::WriteFailed(format!(
                    "Failed to insert word: {}",
                    e
                )))
            })?;

        Ok(Word { id, ..word })
    }

    /// Load the complete word pool ordered by identifier
    pub async fn find_all(&self) -> Result<Vec<Word>> {
        tracing::info!("Loading word pool");

        sqlx::query_as::<_, Word>("SELECT id, value FROM words ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load words");
                Error::Store(StoreError::ReadFailed(format!(
                    "Failed to load words: {}",
                    e
                )))
            })
    }

    /// Number of words in the pool
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM words")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Store(StoreError::ReadFailed(format!(
                    "Failed to count words: {}",
                    e
                )))
            })
    }

    /// Release the connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store<Word> for WordStore {
    async fn save(&mut self, model: Word) -> Result<Word> {
        WordStore::save(self, model).await
    }

    async fn find_all(&self) -> Result<Vec<Word>> {
        WordStore::find_all(self).await
    }
}
