//! Repository layer for document storage
//!
//! Every resource lives in a named collection of JSON documents. The list,
//! schedule, accommodation and places collections are kept as singletons by
//! the services: writes replace or merge the one document instead of adding
//! new ones.

pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{error::AppResult, models::UpdateResult};

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    TravelData,
    Schedules,
    Accommodations,
    Places,
    Posts,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::TravelData => "travelData",
            Collection::Schedules => "schedules",
            Collection::Accommodations => "accommodations",
            Collection::Places => "places",
            Collection::Posts => "posts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A document as stored, with its generated id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Body with the id exposed as `_id`, the shape clients read back
    pub fn into_json(self) -> Value {
        match self.body {
            Value::Object(mut map) => {
                map.insert("_id".to_string(), Value::String(self.id.to_string()));
                Value::Object(map)
            }
            other => other,
        }
    }
}

/// Storage backend for document collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Oldest document of a collection
    async fn find_one(&self, collection: Collection) -> AppResult<Option<StoredDocument>>;

    /// Every document of a collection, oldest first
    async fn find_all(&self, collection: Collection) -> AppResult<Vec<StoredDocument>>;

    async fn insert_one(&self, collection: Collection, body: Value) -> AppResult<Uuid>;

    /// Delete every document of the collection and insert `body` as the only one
    async fn replace_all(&self, collection: Collection, body: Value) -> AppResult<Uuid>;

    /// Merge the top-level fields of `fields` into the oldest document,
    /// inserting `fields` as a new document when the collection is empty
    async fn merge_one(&self, collection: Collection, fields: Value) -> AppResult<UpdateResult>;

    /// Check the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the document store
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Repository backed by Postgres
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(postgres::PgDocumentStore::new(pool)))
    }
}

/// Top-level merge used by [`DocumentStore::merge_one`] implementations
pub fn merge_fields(target: &mut Value, fields: Value) -> bool {
    let (Value::Object(target), Value::Object(fields)) = (target, fields) else {
        return false;
    };
    let mut modified = false;
    for (key, value) in fields {
        if target.get(&key) != Some(&value) {
            target.insert(key, value);
            modified = true;
        }
    }
    modified
}
