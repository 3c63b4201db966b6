//! Shared fixtures for the router tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tripmap_server::{
    api,
    models::UpdateResult,
    repository::{merge_fields, Collection, DocumentStore, Repository, StoredDocument},
    services::{
        geocoding::{KeywordDocument, PlaceSearch},
        Services,
    },
    AppConfig, AppResult, AppState,
};

/// Collections kept in insertion order
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn push(&self, collection: Collection, body: Value) -> Uuid {
        let id = Uuid::new_v4();
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(StoredDocument {
                id,
                body,
                created_at: Utc::now(),
            });
        id
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: Collection) -> AppResult<Option<StoredDocument>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(&collection).and_then(|docs| docs.first().cloned()))
    }

    async fn find_all(&self, collection: Collection) -> AppResult<Vec<StoredDocument>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn insert_one(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        Ok(self.push(collection, body))
    }

    async fn replace_all(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        self.collections.lock().unwrap().remove(&collection);
        Ok(self.push(collection, body))
    }

    async fn merge_one(&self, collection: Collection, fields: Value) -> AppResult<UpdateResult> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(doc) = collections.get_mut(&collection).and_then(|docs| docs.first_mut()) {
            let modified = merge_fields(&mut doc.body, fields);
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                ..Default::default()
            });
        }
        drop(collections);

        let id = self.push(collection, fields);
        Ok(UpdateResult {
            acknowledged: true,
            upserted_count: 1,
            upserted_id: Some(id),
            ..Default::default()
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Resolves names from a fixed table
#[derive(Default)]
pub struct TableSearch {
    places: HashMap<String, (f64, f64)>,
}

impl TableSearch {
    pub fn with(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.places.insert(name.to_string(), (lat, lng));
        self
    }
}

#[async_trait]
impl PlaceSearch for TableSearch {
    fn is_configured(&self) -> bool {
        true
    }

    async fn search_keyword(&self, query: &str) -> AppResult<Vec<KeywordDocument>> {
        Ok(self
            .places
            .get(query)
            .map(|(lat, lng)| KeywordDocument {
                place_name: query.to_string(),
                x: lng.to_string(),
                y: lat.to_string(),
                ..Default::default()
            })
            .into_iter()
            .collect())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new(search: TableSearch) -> Self {
        let store = Arc::new(MemoryStore::default());
        let repository = Repository::new(store.clone());
        let services = Services::with_search(repository, Arc::new(search));
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(services),
        };
        Self {
            router: api::create_router(state),
            store,
        }
    }

    /// Serve the router on an ephemeral port; returns the base URL
    pub async fn serve(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
