//! Document store tests against a live Postgres
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use serde_json::json;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::task::JoinSet;
use tripmap_server::repository::{postgres::PgDocumentStore, Collection, DocumentStore};

async fn store() -> (PgDocumentStore, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    (PgDocumentStore::new(pool.clone()), pool)
}

async fn clear(pool: &PgPool, collection: Collection) {
    sqlx::query("DELETE FROM documents WHERE collection = $1")
        .bind(collection.name())
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_concurrent_replace_keeps_one_document() {
    let (store, pool) = store().await;
    clear(&pool, Collection::Places).await;
    let store = Arc::new(store);

    let mut writers = JoinSet::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        writers.spawn(async move {
            store
                .replace_all(Collection::Places, json!({ "name": format!("place {}", i) }))
                .await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined.unwrap().unwrap();
    }

    let docs = store.find_all(Collection::Places).await.unwrap();
    assert_eq!(docs.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_merge_upserts_once() {
    let (store, pool) = store().await;
    clear(&pool, Collection::Schedules).await;
    let store = Arc::new(store);

    let mut writers = JoinSet::new();
    for day in ["day1", "day2", "day3"] {
        let store = Arc::clone(&store);
        writers.spawn(async move {
            store
                .merge_one(Collection::Schedules, json!({ day: [] }))
                .await
        });
    }
    while let Some(joined) = writers.join_next().await {
        joined.unwrap().unwrap();
    }

    let docs = store.find_all(Collection::Schedules).await.unwrap();
    assert_eq!(docs.len(), 1);
    for day in ["day1", "day2", "day3"] {
        assert!(docs[0].body.get(day).is_some());
    }
}
