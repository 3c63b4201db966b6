//! Singleton document endpoints: list, schedule, accommodations, places

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::UpdateResult,
    repository::Collection,
};

/// Id of the document that now holds the collection
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub inserted_id: Uuid,
}

/// Schedule merge response
#[derive(Serialize, ToSchema)]
pub struct ScheduleSaveResponse {
    pub message: String,
    pub result: UpdateResult,
}

/// Everything stored in the places collection
#[derive(Serialize, ToSchema)]
pub struct PlacesResponse {
    #[schema(value_type = Vec<Object>)]
    pub places: Vec<Value>,
}

// ---- List ----

/// Get the travel list document
#[utoipa::path(
    get,
    path = "/list",
    tag = "documents",
    responses(
        (status = 200, description = "Stored list, or null", body = crate::models::ListDocument)
    )
)]
pub async fn get_list(State(state): State<crate::AppState>) -> AppResult<Json<Option<Value>>> {
    let doc = state.services.documents.get(Collection::TravelData).await?;
    Ok(Json(doc))
}

/// Replace the travel list document
#[utoipa::path(
    post,
    path = "/list",
    tag = "documents",
    request_body = crate::models::ListDocument,
    responses(
        (status = 200, description = "List stored", body = InsertedResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_list(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertedResponse>> {
    let inserted_id = state.services.documents.replace(Collection::TravelData, body).await?;
    Ok(Json(InsertedResponse { inserted_id }))
}

// ---- Schedule ----

/// Get the schedule document
#[utoipa::path(
    get,
    path = "/schedule",
    tag = "documents",
    responses(
        (status = 200, description = "Stored schedule, or null", body = crate::models::ScheduleDocument)
    )
)]
pub async fn get_schedule(State(state): State<crate::AppState>) -> AppResult<Json<Option<Value>>> {
    let doc = state.services.documents.get(Collection::Schedules).await?;
    Ok(Json(doc))
}

/// Merge days into the schedule document
///
/// Only the days present in the body are overwritten.
#[utoipa::path(
    post,
    path = "/schedule",
    tag = "documents",
    request_body = crate::models::ScheduleDocument,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleSaveResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_schedule(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ScheduleSaveResponse>> {
    let result = state.services.documents.merge(Collection::Schedules, body).await?;
    Ok(Json(ScheduleSaveResponse {
        message: "Schedule updated".to_string(),
        result,
    }))
}

// ---- Accommodations ----

/// Get the accommodation document
#[utoipa::path(
    get,
    path = "/accommodations",
    tag = "documents",
    responses(
        (status = 200, description = "Stored accommodations, or null", body = crate::models::AccommodationDocument)
    )
)]
pub async fn get_accommodations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Option<Value>>> {
    let doc = state.services.documents.get(Collection::Accommodations).await?;
    Ok(Json(doc))
}

/// Replace the accommodation document
#[utoipa::path(
    post,
    path = "/accommodations",
    tag = "documents",
    request_body = crate::models::AccommodationDocument,
    responses(
        (status = 200, description = "Accommodations stored", body = InsertedResponse)
    )
)]
pub async fn save_accommodations(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertedResponse>> {
    let inserted_id = state
        .services
        .documents
        .replace(Collection::Accommodations, body)
        .await?;
    Ok(Json(InsertedResponse { inserted_id }))
}

// ---- Places ----

/// List the places collection
#[utoipa::path(
    get,
    path = "/places",
    tag = "documents",
    responses(
        (status = 200, description = "Stored places", body = PlacesResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_places(State(state): State<crate::AppState>) -> AppResult<Json<PlacesResponse>> {
    let places = state.services.documents.list(Collection::Places).await?;
    Ok(Json(PlacesResponse { places }))
}

/// Replace the places collection with one document
#[utoipa::path(
    post,
    path = "/places",
    tag = "documents",
    responses(
        (status = 200, description = "Places stored", body = InsertedResponse)
    )
)]
pub async fn save_places(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InsertedResponse>> {
    let inserted_id = state.services.documents.replace(Collection::Places, body).await?;
    Ok(Json(InsertedResponse { inserted_id }))
}
