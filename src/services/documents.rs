//! Singleton document collections (list, schedule, accommodations, places)

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AccommodationDocument, ListDocument, ScheduleDocument, UpdateResult},
    repository::{Collection, Repository},
};

#[derive(Clone)]
pub struct DocumentsService {
    repository: Repository,
}

/// Only JSON objects are stored; a client-sent `_id` is dropped so the
/// stored id stays authoritative
fn writable_body(mut body: Value) -> AppResult<Value> {
    match body.as_object_mut() {
        Some(map) => {
            map.remove("_id");
            Ok(body)
        }
        None => Err(AppError::Validation(
            "Document body must be a JSON object".to_string(),
        )),
    }
}

impl DocumentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// The collection's document, `None` when nothing was stored yet
    pub async fn get(&self, collection: Collection) -> AppResult<Option<Value>> {
        let doc = self.repository.store.find_one(collection).await?;
        Ok(doc.map(|d| d.into_json()))
    }

    /// Every document of the collection
    pub async fn list(&self, collection: Collection) -> AppResult<Vec<Value>> {
        let docs = self.repository.store.find_all(collection).await?;
        Ok(docs.into_iter().map(|d| d.into_json()).collect())
    }

    /// Replace whatever the collection holds with `body`
    pub async fn replace(&self, collection: Collection, body: Value) -> AppResult<Uuid> {
        let body = writable_body(body)?;
        let id = self.repository.store.replace_all(collection, body).await?;
        tracing::info!("Stored new {} document {}", collection, id);
        Ok(id)
    }

    /// Overwrite the top-level fields present in `body`, creating the
    /// document if the collection is empty
    pub async fn merge(&self, collection: Collection, body: Value) -> AppResult<UpdateResult> {
        let body = writable_body(body)?;
        let result = self.repository.store.merge_one(collection, body).await?;
        tracing::info!(
            "Merged {} document (matched {}, upserted {})",
            collection,
            result.matched_count,
            result.upserted_count
        );
        Ok(result)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.store.ping().await
    }

    async fn typed<T: DeserializeOwned>(&self, collection: Collection) -> AppResult<Option<T>> {
        match self.repository.store.find_one(collection).await? {
            Some(doc) => serde_json::from_value(doc.body).map(Some).map_err(|e| {
                AppError::Internal(format!("Stored {} document is malformed: {}", collection, e))
            }),
            None => Ok(None),
        }
    }

    pub async fn list_document(&self) -> AppResult<Option<ListDocument>> {
        self.typed(Collection::TravelData).await
    }

    pub async fn schedule_document(&self) -> AppResult<Option<ScheduleDocument>> {
        self.typed(Collection::Schedules).await
    }

    pub async fn accommodation_document(&self) -> AppResult<Option<AccommodationDocument>> {
        self.typed(Collection::Accommodations).await
    }
}
