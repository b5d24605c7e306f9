//! Core record types

use std::fmt;
use std::sync::{Arc, OnceLock};

/// A generated article
///
/// `Article` is a handle: clones share the same record. The store keeps one
/// clone in its buffer while the caller holds the one returned from
/// [`Store::save`](crate::db::Store::save), so the identifier assigned during
/// a flush is visible to both. The identifier can be set at most once.
#[derive(Clone)]
pub struct Article {
    inner: Arc<ArticleRecord>,
}

struct ArticleRecord {
    id: OnceLock<i64>,
    text: String,
}

impl Article {
    /// Create an article that has not been persisted yet
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ArticleRecord {
                id: OnceLock::new(),
                text: text.into(),
            }),
        }
    }

    /// Materialize an article read back from storage
    pub(crate) fn persisted(id: i64, text: String) -> Self {
        let article = Self::new(text);
        article.assign_id(id);
        article
    }

    /// Storage-generated identifier, `None` until flushed
    pub fn id(&self) -> Option<i64> {
        self.inner.id.get().copied()
    }

    /// Article body
    pub fn text(&self) -> &str {
        &self.inner.text
    }

    /// Whether the article has been written to storage
    pub fn is_persisted(&self) -> bool {
        self.inner.id.get().is_some()
    }

    /// Whether both handles refer to the same record
    pub fn same_record(&self, other: &Article) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Set the identifier; returns false if one was already assigned
    pub(crate) fn assign_id(&self, id: i64) -> bool {
        self.inner.id.set(id).is_ok()
    }
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            .field("id", &self.id())
            .field("text", &self.text())
            .finish()
    }
}

/// A word from the generation pool
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Word {
    /// Storage identifier (0 until saved)
    pub id: i64,
    /// The token itself
    pub value: String,
}

impl Word {
    /// Create a word that has not been saved yet
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: 0,
            value: value.into(),
        }
    }
}
