//! Geocoded places

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::day::DayKey;

/// A place resolved to coordinates. Rebuilt on every lookup, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Name the place was searched with
    pub query: String,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    /// Category path reported by the search service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_key: Option<DayKey>,
}
