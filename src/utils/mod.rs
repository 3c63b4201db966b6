//! Small helpers shared by the API and the map view

pub mod time;

use std::collections::HashMap;

use crate::models::{DayKey, DayPlaces};

pub use time::{convert_to_24_hour, is_current_time_in_range, is_time_in_range};

/// Map each place title to the first day (in itinerary order) listing it
pub fn title_day_map(days: &DayPlaces) -> HashMap<String, DayKey> {
    let mut map = HashMap::new();
    for day in DayKey::ORDERED {
        for title in days.get(day) {
            map.entry(title.clone()).or_insert(day);
        }
    }
    map
}
