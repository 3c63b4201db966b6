//! Trip map server
//!
//! Stores a multi-day trip (place lists, schedule, accommodations, posts)
//! behind a REST JSON API, geocodes place names for the map, and provides
//! the state machine driving the map view.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;
pub mod view;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
