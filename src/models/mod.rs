//! Data models for the trip map

pub mod accommodation;
pub mod day;
pub mod list;
pub mod location;
pub mod post;
pub mod schedule;

// Re-export commonly used types
pub use accommodation::{Accommodation, AccommodationDocument};
pub use day::{Category, DayKey};
pub use list::{DayPlaces, ListDocument, PlaceSelection};
pub use location::Location;
pub use post::{CreatePost, Post};
pub use schedule::{ScheduleDocument, ScheduleEntry, UpdateResult};
