//! Itinerary days and map categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// One of the five itinerary days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
}

impl DayKey {
    /// Days in itinerary order
    pub const ORDERED: [DayKey; 5] = [
        DayKey::Day1,
        DayKey::Day2,
        DayKey::Day3,
        DayKey::Day4,
        DayKey::Day5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Day1 => "day1",
            DayKey::Day2 => "day2",
            DayKey::Day3 => "day3",
            DayKey::Day4 => "day4",
            DayKey::Day5 => "day5",
        }
    }

    /// Colour-coded marker image for this day
    pub fn marker_icon(&self) -> &'static str {
        match self {
            DayKey::Day1 => "/assets/markerColor/markerred.png",
            DayKey::Day2 => "/assets/markerColor/markerorange.png",
            DayKey::Day3 => "/assets/markerColor/markeryellow.png",
            DayKey::Day4 => "/assets/markerColor/markergreen.png",
            DayKey::Day5 => "/assets/markerColor/markerblue.png",
        }
    }

    /// 1-based day number
    pub fn number(&self) -> u8 {
        match self {
            DayKey::Day1 => 1,
            DayKey::Day2 => 2,
            DayKey::Day3 => 3,
            DayKey::Day4 => 4,
            DayKey::Day5 => 5,
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ORDERED
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown day key: {}", s)))
    }
}

/// Place filter driving which markers are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Travel,
    Cafe,
    All,
    Day(DayKey),
}

impl Category {
    /// Category buttons in display order
    pub const BUTTONS: [Category; 8] = [
        Category::Travel,
        Category::Cafe,
        Category::All,
        Category::Day(DayKey::Day1),
        Category::Day(DayKey::Day2),
        Category::Day(DayKey::Day3),
        Category::Day(DayKey::Day4),
        Category::Day(DayKey::Day5),
    ];

    pub fn day(&self) -> Option<DayKey> {
        match self {
            Category::Day(day) => Some(*day),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Category::Travel => "Sights".to_string(),
            Category::Cafe => "Cafes".to_string(),
            Category::All => "Everything".to_string(),
            Category::Day(day) => format!("Day {}", day.number()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Travel => f.write_str("travel"),
            Category::Cafe => f.write_str("cafe"),
            Category::All => f.write_str("all"),
            Category::Day(day) => f.write_str(day.as_str()),
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel" => Ok(Category::Travel),
            "cafe" => Ok(Category::Cafe),
            "all" => Ok(Category::All),
            other => other
                .parse::<DayKey>()
                .map(Category::Day)
                .map_err(|_| AppError::Validation(format!("Unknown category: {}", s))),
        }
    }
}
