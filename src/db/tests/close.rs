use super::{open_store, row_count};
use crate::db::ArticleStore;
use crate::error::FlushError;
use crate::types::Article;
use crate::Error;
use std::collections::HashSet;

/// 2500 articles with the default batch size: two automatic flushes, the
/// remaining 500 written by `close`.
#[tokio::test]
async fn test_close_flushes_trailing_batch() {
    let (_temp_file, config, mut store) = open_store(1000).await;
    assert_eq!(store.batch_size(), 1000);

    let mut saved = Vec::with_capacity(2500);
    for i in 0..2500 {
        saved.push(store.save(Article::new(format!("article {}", i))).await.unwrap());

        match i + 1 {
            999 => assert_eq!(row_count(&store).await, 0),
            1000 => assert_eq!(row_count(&store).await, 1000),
            1999 => assert_eq!(row_count(&store).await, 1000),
            2000 => assert_eq!(row_count(&store).await, 2000),
            _ => {}
        }
    }
    assert_eq!(store.buffered(), 500);
    assert_eq!(row_count(&store).await, 2000);

    store.close().await.unwrap();
    assert!(saved.iter().all(|a| a.is_persisted()));

    // Reopen and read everything back
    let store = ArticleStore::open(&config).await.unwrap();
    let found = store.find_all().await.unwrap();
    assert_eq!(found.len(), 2500);

    let ids: HashSet<i64> = found.iter().filter_map(|a| a.id()).collect();
    assert_eq!(ids.len(), 2500);
    for (memory, stored) in saved.iter().zip(&found) {
        assert_eq!(memory.id(), stored.id());
        assert_eq!(memory.text(), stored.text());
    }

    store.close().await.unwrap();
}

#[tokio::test]
async fn test_close_with_empty_buffer() {
    let (_temp_file, config, mut store) = open_store(5).await;

    for i in 0..5 {
        store.save(Article::new(format!("{}", i))).await.unwrap();
    }
    assert_eq!(store.buffered(), 0);
    store.close().await.unwrap();

    let store = ArticleStore::open(&config).await.unwrap();
    assert_eq!(store.find_all().await.unwrap().len(), 5);
    store.close().await.unwrap();
}

/// Reopening keeps appending; identifiers continue past existing rows.
#[tokio::test]
async fn test_ids_continue_after_reopen() {
    let (_temp_file, config, mut store) = open_store(10).await;
    store.save(Article::new("first run")).await.unwrap();
    store.close().await.unwrap();

    let mut store = ArticleStore::open(&config).await.unwrap();
    let second = store.save(Article::new("second run")).await.unwrap();
    store.close().await.unwrap();

    assert_eq!(second.id(), Some(2));
}

#[tokio::test]
async fn test_pool_released_after_close() {
    let (_temp_file, _config, store) = open_store(10).await;
    let pool = store.pool().clone();

    store.close().await.unwrap();
    assert!(pool.is_closed());
}

/// A failing final flush is reported, and the connection is released anyway.
#[tokio::test]
async fn test_close_releases_pool_when_final_flush_fails() {
    let (_temp_file, _config, mut store) = open_store(10).await;

    sqlx::query(
        r#"
        CREATE TRIGGER reject_all BEFORE INSERT ON articles
        BEGIN
            SELECT RAISE(ABORT, 'rejected');
        END
        "#,
    )
    .execute(store.pool())
    .await
    .unwrap();

    let article = store.save(Article::new("never stored")).await.unwrap();
    let pool = store.pool().clone();

    let result = store.close().await;
    assert!(
        matches!(result, Err(Error::Flush(FlushError::InsertFailed(_)))),
        "expected insert failure, got: {:?}",
        result
    );
    assert!(pool.is_closed());
    assert_eq!(article.id(), None);
}
