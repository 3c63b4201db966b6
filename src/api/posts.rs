//! Board post endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreatePost, Post},
};

#[derive(Serialize, ToSchema)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Serialize, ToSchema)]
pub struct PostCreatedResponse {
    pub message: String,
    pub id: Uuid,
}

/// List posts, newest first
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts sorted by date descending", body = PostsResponse)
    )
)]
pub async fn list_posts(State(state): State<crate::AppState>) -> AppResult<Json<PostsResponse>> {
    let posts = state.services.posts.list().await?;
    Ok(Json(PostsResponse { posts }))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePost,
    responses(
        (status = 201, description = "Post created", body = PostCreatedResponse),
        (status = 400, description = "A required field is missing", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<PostCreatedResponse>)> {
    let id = state.services.posts.create(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostCreatedResponse {
            message: "Post saved".to_string(),
            id,
        }),
    ))
}
