//! Article text generation

use crate::types::{Article, Word};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Produces one article's text from the word pool
///
/// Implementations must not touch any store.
pub trait ArticleGenerator: Send + Sync {
    /// Build a new, unpersisted article from `words`
    fn generate(&self, words: &[Word]) -> Article;
}

/// Shuffles the whole pool and joins it with single spaces
pub struct RandomArticleGenerator {
    rng: Mutex<StdRng>,
}

impl RandomArticleGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomArticleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleGenerator for RandomArticleGenerator {
    fn generate(&self, words: &[Word]) -> Article {
        let mut picked: Vec<&str> = words.iter().map(|w| w.value.as_str()).collect();
        {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            picked.shuffle(&mut *rng);
        }
        Article::new(picked.join(" "))
    }
}
