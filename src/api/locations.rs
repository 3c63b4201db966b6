//! Server-side place resolution for a map category

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{Category, Location},
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LocationQuery {
    /// travel, cafe, all or day1..day5
    pub category: String,
}

#[derive(Serialize, ToSchema)]
pub struct LocationsResponse {
    pub category: String,
    pub locations: Vec<Location>,
}

/// Resolve the places of a category to coordinates
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    params(LocationQuery),
    responses(
        (status = 200, description = "Resolved places; unresolvable names are left out", body = LocationsResponse),
        (status = 400, description = "Unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_locations(
    State(state): State<crate::AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<LocationsResponse>> {
    let category: Category = query.category.parse()?;
    let list = state
        .services
        .documents
        .list_document()
        .await?
        .unwrap_or_default();

    let selection = list.selection(category);
    let locations = state.services.geocoding.resolve(&selection.titles).await;

    Ok(Json(LocationsResponse {
        category: category.to_string(),
        locations: selection.tag(locations),
    }))
}
