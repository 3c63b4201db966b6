//! HTTP client for the trip documents, as used by the map view

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    error::AppResult,
    models::{AccommodationDocument, ListDocument, ScheduleDocument},
};

/// Source of the documents the map view renders
#[async_trait]
pub trait TripData: Send + Sync {
    async fn fetch_list(&self) -> AppResult<Option<ListDocument>>;

    async fn fetch_schedule(&self) -> AppResult<Option<ScheduleDocument>>;

    async fn fetch_accommodations(&self) -> AppResult<Option<AccommodationDocument>>;
}

/// Reads `/api/list`, `/api/schedule` and `/api/accommodations` from a running server
#[derive(Clone)]
pub struct TripApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl TripApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let url = format!("{}/api/{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let doc = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Option<T>>()
            .await?;
        Ok(doc)
    }
}

#[async_trait]
impl TripData for TripApiClient {
    async fn fetch_list(&self) -> AppResult<Option<ListDocument>> {
        self.get("list").await
    }

    async fn fetch_schedule(&self) -> AppResult<Option<ScheduleDocument>> {
        self.get("schedule").await
    }

    async fn fetch_accommodations(&self) -> AppResult<Option<AccommodationDocument>> {
        self.get("accommodations").await
    }
}
