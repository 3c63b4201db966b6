//! Day-by-day schedule document

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::day::DayKey;

/// One stop of a day, in visiting order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub place: String,
    /// Travel time from the previous stop, free text
    pub travel_time: String,
    /// Time spent at the stop, free text
    pub stay_time: String,
    /// Arrival time, `HH:MM` or `H:MMAM`/`H:MMPM`
    pub arrival: String,
    pub departure: String,
}

/// Stops grouped per day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ScheduleDocument {
    pub day1: Vec<ScheduleEntry>,
    pub day2: Vec<ScheduleEntry>,
    pub day3: Vec<ScheduleEntry>,
    pub day4: Vec<ScheduleEntry>,
    pub day5: Vec<ScheduleEntry>,
}

impl ScheduleDocument {
    pub fn day(&self, day: DayKey) -> &[ScheduleEntry] {
        match day {
            DayKey::Day1 => &self.day1,
            DayKey::Day2 => &self.day2,
            DayKey::Day3 => &self.day3,
            DayKey::Day4 => &self.day4,
            DayKey::Day5 => &self.day5,
        }
    }
}

/// Outcome of the schedule merge, shaped like a document-store update result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<uuid::Uuid>,
}
