//! The map widget capability the view draws on
//!
//! The browser SDK (markers, info windows, projection) sits behind
//! [`MapWidget`], and [`MapLoader`] creates one. Tests substitute an
//! in-memory widget.

use async_trait::async_trait;

use crate::{config::MapConfig, error::AppResult, models::DayKey};

/// Geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Pixel position inside the map container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Handle of a marker placed on the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Marker image choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Neutral,
    Day(DayKey),
    Accommodation,
}

impl MarkerIcon {
    /// Width and height of every marker image, in pixels
    pub const SIZE: (u32, u32) = (30, 42);

    pub fn image(&self) -> &'static str {
        match self {
            MarkerIcon::Neutral => "/assets/markerColor/markernormal.png",
            MarkerIcon::Day(day) => day.marker_icon(),
            MarkerIcon::Accommodation => "/assets/markerColor/markerhotel.png",
        }
    }
}

/// What to draw for one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub icon: MarkerIcon,
    /// Shown in the hover info window
    pub title: String,
}

/// Initial viewport of a freshly created widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub level: u8,
}

impl From<&MapConfig> for MapOptions {
    fn from(config: &MapConfig) -> Self {
        Self {
            center: LatLng::new(config.center_lat, config.center_lng),
            level: config.level,
        }
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        (&MapConfig::default()).into()
    }
}

pub trait MapWidget {
    /// Project a coordinate to a container pixel
    fn container_point(&self, coord: LatLng) -> ScreenPoint;

    /// Inverse of [`MapWidget::container_point`]
    fn coords_at(&self, point: ScreenPoint) -> LatLng;

    fn set_center(&mut self, coord: LatLng);

    fn set_level(&mut self, level: u8);

    fn add_marker(&mut self, marker: &MarkerSpec) -> MarkerId;

    fn remove_marker(&mut self, id: MarkerId);

    /// Open the single info window above a marker
    fn open_info(&mut self, id: MarkerId, content: &str);

    fn close_info(&mut self);

    /// Release the widget; no calls follow
    fn destroy(&mut self) {}
}

/// Loads the SDK and builds a widget
#[async_trait(?Send)]
pub trait MapLoader {
    type Widget: MapWidget;

    async fn load(&self, options: &MapOptions) -> AppResult<Self::Widget>;
}
