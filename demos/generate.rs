//! Article generation example
//!
//! Seeds the word pool if it is empty, generates articles and reports how
//! many are stored.
//!
//! Usage: `cargo run --example generate -- [config.json] [count]`

use article_gen::{ArticleService, ArticleStore, Config, RandomArticleGenerator, Word, WordStore};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const SEED_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::from_file(Path::new(&path))?,
        None => Config::default(),
    };
    let count: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => 10_000,
    };

    let mut words = WordStore::open(&config).await?;
    if words.count().await? == 0 {
        for value in SEED_WORDS {
            words.save(Word::new(*value)).await?;
        }
    }

    let mut articles = ArticleStore::open(&config).await?;
    ArticleService::from_config(RandomArticleGenerator::new(), &config)
        .generate(&words, count, &mut articles)
        .await?;
    articles.close().await?;
    words.close().await;

    let articles = ArticleStore::open(&config).await?;
    println!("Stored articles: {}", articles.find_all().await?.len());
    articles.close().await?;

    Ok(())
}
