use crate::config::Config;
use crate::db::ArticleStore;
use tempfile::NamedTempFile;

mod close;

/// Config pointing at a fresh temporary SQLite file
fn temp_config(batch_size: usize) -> (NamedTempFile, Config) {
    let temp_file = NamedTempFile::new().unwrap();
    let config = Config {
        database_url: format!("sqlite:{}", temp_file.path().display()),
        batch_size,
        ..Default::default()
    };
    (temp_file, config)
}

/// Open an article store on a fresh temporary database
async fn open_store(batch_size: usize) -> (NamedTempFile, Config, ArticleStore) {
    let (temp_file, config) = temp_config(batch_size);
    let store = ArticleStore::open(&config).await.unwrap();
    (temp_file, config, store)
}

/// Rows currently in the articles table
async fn row_count(store: &ArticleStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(store.pool())
        .await
        .unwrap()
}
