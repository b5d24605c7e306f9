//! Article generation pipeline

use crate::config::{Config, DEFAULT_PROGRESS_INTERVAL};
use crate::db::Store;
use crate::generator::ArticleGenerator;
use crate::types::{Article, Word};
use crate::Result;

/// Receives the number of articles generated so far
///
/// Purely observational; reports never affect generation.
pub trait ProgressSink: Send + Sync {
    /// Called with the running count every `progress_interval` articles
    fn report(&self, generated: usize);
}

/// Logs progress at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, generated: usize) {
        tracing::info!(generated, "Articles generated");
    }
}

/// Discards progress reports
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _generated: usize) {}
}

/// Drives generation of articles into a store
pub struct ArticleService<G> {
    generator: G,
    progress: Box<dyn ProgressSink>,
    progress_interval: usize,
}

impl<G: ArticleGenerator> ArticleService<G> {
    /// Service logging progress every 1000 articles
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            progress: Box::new(LogProgress),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Service logging progress every `config.progress_interval` articles
    pub fn from_config(generator: G, config: &Config) -> Self {
        Self::new(generator).with_progress_interval(config.progress_interval)
    }

    /// Replace the progress sink
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(sink);
        self
    }

    /// Report every `interval` articles (0 is treated as 1)
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Generate `count` articles and hand each to `article_store`
    ///
    /// The word pool is read once up front. The store is neither flushed nor
    /// closed here; the caller owns its lifecycle and must close it to
    /// persist a trailing partial batch.
    pub async fn generate<W, A>(
        &self,
        word_store: &W,
        count: usize,
        article_store: &mut A,
    ) -> Result<()>
    where
        W: Store<Word> + ?Sized,
        A: Store<Article> + ?Sized,
    {
        tracing::info!(count, "Generating articles");
        let words = word_store.find_all().await?;
        if words.is_empty() {
            tracing::warn!("Word pool is empty, articles will have no text");
        }

        for i in 0..count {
            if i > 0 && i % self.progress_interval == 0 {
                self.progress.report(i);
            }
            let article = self.generator.generate(&words);
            article_store.save(article).await?;
        }

        Ok(())
    }
}
