//! # article-gen
//!
//! Generates synthetic articles from a pool of words and persists them to
//! SQLite through a buffered batch writer.
//!
//! ## Overview
//!
//! - [`WordStore`] provides the word pool
//! - an [`ArticleGenerator`] turns the pool into article text
//! - [`ArticleService`] drives generation
//! - [`ArticleStore`] buffers articles and writes them in batches,
//!   assigning each its generated identifier
//!
//! ## Quick Start
//!
//! ```no_run
//! use article_gen::{ArticleService, ArticleStore, Config, RandomArticleGenerator, WordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         database_url: "sqlite:articles.db".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let words = WordStore::open(&config).await?;
//!     let mut articles = ArticleStore::open(&config).await?;
//!
//!     ArticleService::new(RandomArticleGenerator::new())
//!         .generate(&words, 10_000, &mut articles)
//!         .await?;
//!
//!     // Persists the trailing partial batch
//!     articles.close().await?;
//!     words.close().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Article text generation
pub mod generator;
/// Generation pipeline
pub mod service;
/// Core record types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DEFAULT_BATCH_SIZE};
pub use db::{ArticleStore, Store, WordStore};
pub use error::{Error, FlushError, Result, StoreError};
pub use generator::{ArticleGenerator, RandomArticleGenerator};
pub use service::{ArticleService, LogProgress, NoProgress, ProgressSink};
pub use types::{Article, Word};
