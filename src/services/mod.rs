//! Business logic services

pub mod documents;
pub mod geocoding;
pub mod posts;

use std::sync::Arc;

use crate::{config::KakaoConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub documents: documents::DocumentsService,
    pub posts: posts::PostsService,
    pub geocoding: geocoding::GeocodingService,
}

impl Services {
    /// Create all services with the given repository, searching through Kakao
    pub fn new(repository: Repository, kakao: &KakaoConfig) -> AppResult<Self> {
        let search = Arc::new(geocoding::KakaoLocalClient::new(kakao)?);
        Ok(Self::with_search(repository, search))
    }

    /// Create all services with an explicit search backend
    pub fn with_search(repository: Repository, search: Arc<dyn geocoding::PlaceSearch>) -> Self {
        Self {
            documents: documents::DocumentsService::new(repository.clone()),
            posts: posts::PostsService::new(repository),
            geocoding: geocoding::GeocodingService::new(search),
        }
    }
}
