//! Map view state: selected category, place and day, markers and side panel
//!
//! Transitions are plain methods. Anything asynchronous is handed back to the
//! caller: a category change returns a [`LocationRequest`] to resolve, and
//! the delayed recentre and panel hide are deadlines checked by [`MapView::tick`].

use std::time::{Duration, Instant};

use chrono::NaiveTime;

use super::map::MapHandle;
use super::widget::{LatLng, MapWidget, MarkerIcon, MarkerId, MarkerSpec};
use crate::{
    models::{
        Accommodation, AccommodationDocument, Category, DayKey, ListDocument, Location,
        PlaceSelection, ScheduleDocument, ScheduleEntry,
    },
    utils::is_time_in_range,
};

/// Wait before recentring on a day so the panel has its final size
pub const RECENTER_DELAY: Duration = Duration::from_millis(100);

/// How long an emptied panel stays up for its close animation
pub const PANEL_HIDE_GRACE: Duration = Duration::from_millis(400);

const MOBILE_MAX_WIDTH: f64 = 600.0;
const DAY_PANEL_OFFSET: f64 = 480.0;
const CLOSED_PANEL_OFFSET: f64 = 350.0;
const MOBILE_BOTTOM_ADJUST: f64 = -1100.0;
const MARKER_SHIFT: f64 = 200.0;

/// Browser viewport measurements the recentring depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    /// Rendered height of the side panel
    pub panel_height: f64,
}

impl Viewport {
    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_MAX_WIDTH
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            panel_height: 0.0,
        }
    }
}

/// Names to resolve for a category switch
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRequest {
    pub id: u64,
    pub category: Category,
    pub selection: PlaceSelection,
    /// Accommodation names shown alongside a day
    pub lodging: Vec<String>,
}

/// Resolved places for a [`LocationRequest`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationBatch {
    pub id: u64,
    pub places: Vec<Location>,
    pub lodging: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub entry: ScheduleEntry,
    /// The current time falls between arrival and departure
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPanel {
    pub day: DayKey,
    pub rows: Vec<ScheduleRow>,
    pub accommodations: Vec<Accommodation>,
}

/// What the side panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Hidden,
    /// Selections cleared, panel still up during the grace period
    Closing,
    Place(Location),
    Day(DayPanel),
}

#[derive(Debug, Clone)]
struct RenderedMarker {
    id: MarkerId,
    location: Location,
}

pub struct MapView {
    category: Category,
    selected_location: Option<Location>,
    selected_day: Option<DayKey>,
    list: Option<ListDocument>,
    schedule: ScheduleDocument,
    accommodations: AccommodationDocument,
    markers: Vec<RenderedMarker>,
    latest_request: u64,
    panel_visible: bool,
    hide_at: Option<Instant>,
    recenter_at: Option<Instant>,
    viewport: Viewport,
    clock: NaiveTime,
}

fn icon_for(category: Category, day: Option<DayKey>) -> MarkerIcon {
    match category {
        Category::Travel | Category::Cafe => MarkerIcon::Neutral,
        Category::All => day.map(MarkerIcon::Day).unwrap_or(MarkerIcon::Neutral),
        Category::Day(day) => MarkerIcon::Day(day),
    }
}

impl MapView {
    pub fn new(viewport: Viewport, clock: NaiveTime) -> Self {
        Self {
            category: Category::Travel,
            selected_location: None,
            selected_day: None,
            list: None,
            schedule: ScheduleDocument::default(),
            accommodations: AccommodationDocument::default(),
            markers: Vec::new(),
            latest_request: 0,
            panel_visible: false,
            hide_at: None,
            recenter_at: None,
            viewport,
            clock,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.selected_location.as_ref()
    }

    pub fn selected_day(&self) -> Option<DayKey> {
        self.selected_day
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Locations currently drawn as markers
    pub fn marker_locations(&self) -> impl Iterator<Item = &Location> {
        self.markers.iter().map(|m| &m.location)
    }

    /// Install freshly fetched documents and start over on the travel list
    pub fn load_documents(
        &mut self,
        list: Option<ListDocument>,
        schedule: ScheduleDocument,
        accommodations: AccommodationDocument,
    ) -> Option<LocationRequest> {
        self.list = list;
        self.schedule = schedule;
        self.accommodations = accommodations;
        self.category = Category::Travel;
        self.selected_location = None;
        self.selected_day = None;
        self.request(Category::Travel)
    }

    fn request(&mut self, category: Category) -> Option<LocationRequest> {
        let list = self.list.as_ref()?;
        self.latest_request += 1;
        let lodging = match category.day() {
            Some(day) => self
                .accommodations
                .for_day(day)
                .into_iter()
                .map(|a| a.name.clone())
                .collect(),
            None => Vec::new(),
        };
        Some(LocationRequest {
            id: self.latest_request,
            category,
            selection: list.selection(category),
            lodging,
        })
    }

    fn begin_hide(&mut self, now: Instant) {
        if self.panel_visible {
            self.hide_at = Some(now + PANEL_HIDE_GRACE);
        }
    }

    fn show_panel(&mut self) {
        self.panel_visible = true;
        self.hide_at = None;
    }

    fn closed_offset(&self) -> f64 {
        if self.viewport.is_mobile() {
            0.0
        } else {
            CLOSED_PANEL_OFFSET
        }
    }

    /// Switch the place filter. Returns the lookup to run for its markers,
    /// or `None` while no list has been loaded.
    pub fn select_category<W: MapWidget>(
        &mut self,
        map: &mut MapHandle<W>,
        category: Category,
        now: Instant,
    ) -> Option<LocationRequest> {
        self.category = category;
        self.selected_location = None;

        match category.day() {
            Some(day) => {
                self.selected_day = Some(day);
                self.show_panel();
                self.recenter_at = Some(now + RECENTER_DELAY);
            }
            None => {
                self.selected_day = None;
                self.recenter_at = None;
                self.begin_hide(now);
                map.move_to_visible_center(self.closed_offset(), 0.0);
            }
        }

        self.request(category)
    }

    /// Draw a resolved batch, unless a newer request superseded it
    pub fn apply_locations<W: MapWidget>(
        &mut self,
        map: &mut MapHandle<W>,
        batch: LocationBatch,
    ) -> bool {
        if batch.id != self.latest_request {
            tracing::debug!(
                "Discarding stale lookup {} (latest is {})",
                batch.id,
                self.latest_request
            );
            return false;
        }

        let category = self.category;
        let places = batch
            .places
            .into_iter()
            .map(|loc| (icon_for(category, loc.day_key), loc));
        let lodging = batch
            .lodging
            .into_iter()
            .map(|loc| (MarkerIcon::Accommodation, loc));
        let (specs, locations): (Vec<_>, Vec<_>) = places
            .chain(lodging)
            .map(|(icon, loc)| {
                let spec = MarkerSpec {
                    position: LatLng::new(loc.lat, loc.lng),
                    icon,
                    title: loc.title.clone(),
                };
                (spec, loc)
            })
            .unzip();

        let ids = map.replace_markers(specs);
        self.markers = ids
            .into_iter()
            .zip(locations)
            .map(|(id, location)| RenderedMarker { id, location })
            .collect();
        tracing::debug!("Showing {} markers for {}", self.markers.len(), category);
        true
    }

    /// Open the clicked place in the panel and keep its marker in view
    pub fn click_marker<W: MapWidget>(&mut self, map: &mut MapHandle<W>, id: MarkerId) -> bool {
        let Some(marker) = self.markers.iter().find(|m| m.id == id) else {
            return false;
        };
        let location = marker.location.clone();
        let position = LatLng::new(location.lat, location.lng);

        self.selected_location = Some(location);
        self.selected_day = None;
        self.recenter_at = None;
        self.show_panel();
        map.center_beside(position, MARKER_SHIFT, 0.0);
        true
    }

    pub fn hover_marker<W: MapWidget>(&self, map: &mut MapHandle<W>, id: MarkerId) {
        map.open_info(id);
    }

    pub fn leave_marker<W: MapWidget>(&self, map: &mut MapHandle<W>) {
        map.close_info();
    }

    /// Clear the selection and put the reference point back in view
    pub fn close_panel<W: MapWidget>(&mut self, map: &mut MapHandle<W>, now: Instant) {
        self.selected_location = None;
        self.selected_day = None;
        self.recenter_at = None;
        self.begin_hide(now);
        map.move_to_visible_center(self.closed_offset(), 0.0);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Time of day used for schedule highlighting
    pub fn set_clock(&mut self, clock: NaiveTime) {
        self.clock = clock;
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.recenter_at, self.hide_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run the deadlines that are due at `now`
    pub fn tick<W: MapWidget>(&mut self, map: &mut MapHandle<W>, now: Instant) {
        if self.recenter_at.is_some_and(|at| at <= now) {
            self.recenter_at = None;
            if self.selected_day.is_some() && self.selected_location.is_none() {
                let (left, bottom) = if self.viewport.is_mobile() {
                    (0.0, self.viewport.panel_height + MOBILE_BOTTOM_ADJUST)
                } else {
                    (DAY_PANEL_OFFSET, 0.0)
                };
                map.move_to_visible_center(left, bottom);
            }
        }

        if self.hide_at.is_some_and(|at| at <= now) {
            self.hide_at = None;
            if self.selected_day.is_none() && self.selected_location.is_none() {
                self.panel_visible = false;
            }
        }
    }

    pub fn panel(&self) -> PanelContent {
        if !self.panel_visible {
            return PanelContent::Hidden;
        }
        if let Some(location) = &self.selected_location {
            return PanelContent::Place(location.clone());
        }
        let Some(day) = self.selected_day else {
            return PanelContent::Closing;
        };

        let rows = self
            .schedule
            .day(day)
            .iter()
            .map(|entry| ScheduleRow {
                highlighted: is_time_in_range(self.clock, &entry.arrival, &entry.departure),
                entry: entry.clone(),
            })
            .collect();
        let accommodations = self
            .accommodations
            .for_day(day)
            .into_iter()
            .cloned()
            .collect();

        PanelContent::Day(DayPanel {
            day,
            rows,
            accommodations,
        })
    }
}
