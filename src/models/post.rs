//! Board posts

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    /// Sort key, newest first
    pub date: String,
}

/// Create post request; every field is required. A field sent as `null`
/// counts as missing, same as an absent or empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreatePost {
    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category is required")
    )]
    pub category: Option<String>,
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content is required")
    )]
    pub content: Option<String>,
    #[validate(
        required(message = "date is required"),
        length(min = 1, message = "date is required")
    )]
    pub date: Option<String>,
}
