//! Map widget bootstrap settings for the browser

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Category;

#[derive(Serialize, ToSchema)]
pub struct CategoryButton {
    pub key: String,
    pub label: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapConfigResponse {
    /// SDK script to load, absent when no browser key is configured
    pub sdk_url: Option<String>,
    pub center_lat: f64,
    pub center_lng: f64,
    pub level: u8,
    pub categories: Vec<CategoryButton>,
}

/// Map SDK location, initial viewport and category buttons
#[utoipa::path(
    get,
    path = "/map/config",
    tag = "map",
    responses(
        (status = 200, description = "Map bootstrap settings", body = MapConfigResponse)
    )
)]
pub async fn map_config(State(state): State<crate::AppState>) -> Json<MapConfigResponse> {
    let config = &state.config;
    Json(MapConfigResponse {
        sdk_url: config.kakao.sdk_script_url(),
        center_lat: config.map.center_lat,
        center_lng: config.map.center_lng,
        level: config.map.level,
        categories: Category::BUTTONS
            .iter()
            .map(|c| CategoryButton {
                key: c.to_string(),
                label: c.label(),
            })
            .collect(),
    })
}
