//! Board posts service

use std::cmp::Reverse;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreatePost, Post},
    repository::{Collection, Repository},
};

#[derive(Clone)]
pub struct PostsService {
    repository: Repository,
}

impl PostsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All posts, newest date first
    pub async fn list(&self) -> AppResult<Vec<Post>> {
        let docs = self.repository.store.find_all(Collection::Posts).await?;
        let mut posts = docs
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id;
                match serde_json::from_value::<Post>(doc.into_json()) {
                    Ok(post) => Some(post),
                    Err(e) => {
                        tracing::warn!("Skipping malformed post {}: {}", id, e);
                        None
                    }
                }
            })
            .collect::<Vec<_>>();
        posts.sort_by_key(|post| Reverse(post.date.clone()));
        Ok(posts)
    }

    /// Store a post once every field is present
    pub async fn create(&self, data: CreatePost) -> AppResult<Uuid> {
        if let Err(errors) = data.validate() {
            let mut missing: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
            missing.sort_unstable();
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let body = serde_json::to_value(&data)
            .map_err(|e| AppError::Internal(format!("Failed to encode post: {}", e)))?;
        let id = self.repository.store.insert_one(Collection::Posts, body).await?;
        tracing::info!(
            "Created post {} in {}",
            id,
            data.category.as_deref().unwrap_or_default()
        );
        Ok(id)
    }
}
