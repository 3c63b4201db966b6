//! In-memory doubles for the map widget and its data sources

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use super::widget::{LatLng, MapLoader, MapOptions, MapWidget, MarkerId, MarkerSpec, ScreenPoint};
use crate::{
    client::TripData,
    error::AppResult,
    models::{AccommodationDocument, ListDocument, ScheduleDocument},
    services::geocoding::{KeywordDocument, PlaceSearch},
};

const PIXELS_PER_DEGREE: f64 = 1000.0;
const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;

#[derive(Debug)]
pub struct WidgetLog {
    pub center: LatLng,
    pub centers: Vec<LatLng>,
    pub level: Option<u8>,
    pub markers: HashMap<MarkerId, MarkerSpec>,
    pub info: Option<(MarkerId, String)>,
    pub destroyed: bool,
    next_id: u64,
}

impl Default for WidgetLog {
    fn default() -> Self {
        Self {
            center: MapOptions::default().center,
            centers: Vec::new(),
            level: None,
            markers: HashMap::new(),
            info: None,
            destroyed: false,
            next_id: 0,
        }
    }
}

impl WidgetLog {
    pub fn marker_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.markers.values().map(|m| m.title.clone()).collect();
        titles.sort();
        titles
    }
}

/// Flat projection around the current centre
#[derive(Default)]
pub struct FakeWidget {
    pub log: Rc<RefCell<WidgetLog>>,
}

impl MapWidget for FakeWidget {
    fn container_point(&self, coord: LatLng) -> ScreenPoint {
        let center = self.log.borrow().center;
        ScreenPoint {
            x: WIDTH / 2.0 + (coord.lng - center.lng) * PIXELS_PER_DEGREE,
            y: HEIGHT / 2.0 - (coord.lat - center.lat) * PIXELS_PER_DEGREE,
        }
    }

    fn coords_at(&self, point: ScreenPoint) -> LatLng {
        let center = self.log.borrow().center;
        LatLng {
            lat: center.lat - (point.y - HEIGHT / 2.0) / PIXELS_PER_DEGREE,
            lng: center.lng + (point.x - WIDTH / 2.0) / PIXELS_PER_DEGREE,
        }
    }

    fn set_center(&mut self, coord: LatLng) {
        let mut log = self.log.borrow_mut();
        log.center = coord;
        log.centers.push(coord);
    }

    fn set_level(&mut self, level: u8) {
        self.log.borrow_mut().level = Some(level);
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> MarkerId {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = MarkerId(log.next_id);
        log.markers.insert(id, marker.clone());
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.log.borrow_mut().markers.remove(&id);
    }

    fn open_info(&mut self, id: MarkerId, content: &str) {
        self.log.borrow_mut().info = Some((id, content.to_string()));
    }

    fn close_info(&mut self) {
        self.log.borrow_mut().info = None;
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().destroyed = true;
    }
}

#[derive(Default)]
pub struct FakeLoader {
    log: Rc<RefCell<WidgetLog>>,
}

impl FakeLoader {
    pub fn log(&self) -> Rc<RefCell<WidgetLog>> {
        Rc::clone(&self.log)
    }
}

#[async_trait(?Send)]
impl MapLoader for FakeLoader {
    type Widget = FakeWidget;

    async fn load(&self, _options: &MapOptions) -> AppResult<FakeWidget> {
        Ok(FakeWidget {
            log: Rc::clone(&self.log),
        })
    }
}

/// Search backend answering from a fixed table, optionally slowly
#[derive(Default)]
pub struct StubSearch {
    places: HashMap<String, (LatLng, Duration)>,
}

impl StubSearch {
    pub fn with(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.places
            .insert(name.to_string(), (LatLng::new(lat, lng), Duration::ZERO));
        self
    }

    pub fn with_delay(mut self, name: &str, lat: f64, lng: f64, delay: Duration) -> Self {
        self.places.insert(name.to_string(), (LatLng::new(lat, lng), delay));
        self
    }
}

#[async_trait]
impl PlaceSearch for StubSearch {
    fn is_configured(&self) -> bool {
        true
    }

    async fn search_keyword(&self, query: &str) -> AppResult<Vec<KeywordDocument>> {
        let Some((coord, delay)) = self.places.get(query).copied() else {
            return Ok(Vec::new());
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(vec![KeywordDocument {
            place_name: query.to_string(),
            x: coord.lng.to_string(),
            y: coord.lat.to_string(),
            ..Default::default()
        }])
    }
}

/// Fixed trip documents
#[derive(Default, Clone)]
pub struct StubTrip {
    pub list: Option<ListDocument>,
    pub schedule: Option<ScheduleDocument>,
    pub accommodations: Option<AccommodationDocument>,
}

#[async_trait]
impl TripData for StubTrip {
    async fn fetch_list(&self) -> AppResult<Option<ListDocument>> {
        Ok(self.list.clone())
    }

    async fn fetch_schedule(&self) -> AppResult<Option<ScheduleDocument>> {
        Ok(self.schedule.clone())
    }

    async fn fetch_accommodations(&self) -> AppResult<Option<AccommodationDocument>> {
        Ok(self.accommodations.clone())
    }
}
