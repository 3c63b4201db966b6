//! The stored place list document

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::day::{Category, DayKey};
use super::location::Location;
use crate::utils::title_day_map;

/// Place names listed for each itinerary day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DayPlaces {
    pub day1: Vec<String>,
    pub day2: Vec<String>,
    pub day3: Vec<String>,
    pub day4: Vec<String>,
    pub day5: Vec<String>,
}

impl DayPlaces {
    pub fn get(&self, day: DayKey) -> &[String] {
        match day {
            DayKey::Day1 => &self.day1,
            DayKey::Day2 => &self.day2,
            DayKey::Day3 => &self.day3,
            DayKey::Day4 => &self.day4,
            DayKey::Day5 => &self.day5,
        }
    }
}

/// Travel spots, cafes and the per-day split
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ListDocument {
    pub travel_list: Vec<String>,
    pub cafe_list: Vec<String>,
    pub days: DayPlaces,
}

/// Names to look up for a category, plus the day each resolved place is tagged with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceSelection {
    pub titles: Vec<String>,
    tags: HashMap<String, DayKey>,
}

impl PlaceSelection {
    pub fn day_of(&self, title: &str) -> Option<DayKey> {
        self.tags.get(title).copied()
    }

    /// Attach day tags, matching on the query a location came from and
    /// falling back to its resolved title
    pub fn tag(&self, locations: Vec<Location>) -> Vec<Location> {
        locations
            .into_iter()
            .map(|mut location| {
                location.day_key = self
                    .day_of(&location.query)
                    .or_else(|| self.day_of(&location.title));
                location
            })
            .collect()
    }
}

impl ListDocument {
    /// Place names shown for a category. "all" merges every day without
    /// duplicates and tags each name with the first day listing it.
    pub fn selection(&self, category: Category) -> PlaceSelection {
        match category {
            Category::Travel => PlaceSelection {
                titles: self.travel_list.clone(),
                tags: HashMap::new(),
            },
            Category::Cafe => PlaceSelection {
                titles: self.cafe_list.clone(),
                tags: HashMap::new(),
            },
            Category::All => {
                let titles: IndexSet<&String> = DayKey::ORDERED
                    .iter()
                    .flat_map(|day| self.days.get(*day))
                    .collect();
                PlaceSelection {
                    titles: titles.into_iter().cloned().collect(),
                    tags: title_day_map(&self.days),
                }
            }
            Category::Day(day) => {
                let titles = self.days.get(day).to_vec();
                let tags = titles.iter().map(|title| (title.clone(), day)).collect();
                PlaceSelection { titles, tags }
            }
        }
    }
}
