//! Place name lookup through the Kakao local keyword search
//!
//! Each name becomes one search request. All requests of a batch run
//! concurrently and the batch completes once every request settled; misses
//! and failures are logged and dropped, so callers may get fewer locations
//! than names.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::task::JoinSet;

use crate::{
    config::KakaoConfig,
    error::{AppError, AppResult},
    models::Location,
};

/// One hit of a keyword search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeywordDocument {
    pub place_name: String,
    /// Longitude, as a decimal string
    pub x: String,
    /// Latitude, as a decimal string
    pub y: String,
    pub category_name: String,
    pub address_name: String,
    pub road_address_name: String,
    pub place_url: String,
    pub phone: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Deserialize)]
struct KeywordResponse {
    #[serde(default)]
    documents: Vec<KeywordDocument>,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl KeywordDocument {
    /// Convert to a location, `None` when the coordinates do not parse
    pub fn into_location(self, query: &str) -> Option<Location> {
        let lat = self.y.trim().parse::<f64>().ok()?;
        let lng = self.x.trim().parse::<f64>().ok()?;
        Some(Location {
            query: query.to_string(),
            title: self.place_name,
            lat,
            lng,
            description: non_empty(self.category_name),
            address: non_empty(self.address_name),
            road_address: non_empty(self.road_address_name),
            url: non_empty(self.place_url),
            phone: non_empty(self.phone),
            thumbnail: non_empty(self.thumbnail_url),
            day_key: None,
        })
    }
}

/// Keyword search capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Whether credentials are present; lookups are skipped entirely otherwise
    fn is_configured(&self) -> bool;

    async fn search_keyword(&self, query: &str) -> AppResult<Vec<KeywordDocument>>;
}

/// HTTP client for `dapi.kakao.com/v2/local/search/keyword.json`
#[derive(Clone)]
pub struct KakaoLocalClient {
    http: reqwest::Client,
    search_url: String,
    rest_key: Option<String>,
}

impl KakaoLocalClient {
    pub fn new(config: &KakaoConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            search_url: config.search_url.clone(),
            rest_key: config.rest_key.clone().filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl PlaceSearch for KakaoLocalClient {
    fn is_configured(&self) -> bool {
        self.rest_key.is_some()
    }

    async fn search_keyword(&self, query: &str) -> AppResult<Vec<KeywordDocument>> {
        let key = self
            .rest_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Kakao REST key is not set".to_string()))?;

        let response: KeywordResponse = self
            .http
            .get(&self.search_url)
            .query(&[("query", query)])
            .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", key))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.documents)
    }
}

/// Resolves place names to locations
#[derive(Clone)]
pub struct GeocodingService {
    search: Arc<dyn PlaceSearch>,
}

impl GeocodingService {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Resolve every name, in completion order. Duplicated names are looked
    /// up once per occurrence.
    pub async fn resolve(&self, names: &[String]) -> Vec<Location> {
        if names.is_empty() {
            return Vec::new();
        }
        if !self.search.is_configured() {
            tracing::error!("Kakao REST key is not configured, skipping {} lookups", names.len());
            return Vec::new();
        }

        let mut lookups = JoinSet::new();
        for name in names {
            let search = Arc::clone(&self.search);
            let name = name.clone();
            lookups.spawn(async move {
                match search.search_keyword(&name).await {
                    Ok(documents) => match documents.into_iter().next() {
                        Some(first) => {
                            let location = first.into_location(&name);
                            if location.is_none() {
                                tracing::warn!("Search hit for {} has no usable coordinates", name);
                            }
                            location
                        }
                        None => {
                            tracing::warn!("No search results for {}", name);
                            None
                        }
                    },
                    Err(e) => {
                        tracing::error!("Search for {} failed: {}", name, e);
                        None
                    }
                }
            });
        }

        let mut locations = Vec::with_capacity(names.len());
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok(Some(location)) => locations.push(location),
                Ok(None) => {}
                Err(e) => tracing::error!("Lookup task failed: {}", e),
            }
        }

        tracing::debug!("Resolved {}/{} places", locations.len(), names.len());
        locations
    }
}
