//! Accommodation booking info

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::day::DayKey;

/// A night's stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub name: String,
    /// Booking page
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(default)]
    pub parking: String,
    #[serde(default)]
    pub note: String,
    pub day: DayKey,
}

/// The stored accommodation document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AccommodationDocument {
    pub accommodations: Vec<Accommodation>,
}

impl AccommodationDocument {
    pub fn for_day(&self, day: DayKey) -> Vec<&Accommodation> {
        self.accommodations.iter().filter(|a| a.day == day).collect()
    }
}
