//! Event loop that owns the map view
//!
//! UI events arrive as [`ViewCommand`]s, place lookups run as spawned tasks
//! and come back tagged with their request id, and every change is published
//! as a [`ViewSnapshot`] on a watch channel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::{mpsc, watch};

use super::map::MapHandle;
use super::state::{LocationBatch, LocationRequest, MapView, PanelContent, Viewport};
use super::widget::{MapLoader, MapOptions, MapWidget, MarkerId};
use crate::{
    client::TripData,
    error::AppResult,
    models::{Category, DayKey},
    services::geocoding::GeocodingService,
};

/// How often the schedule highlight follows the wall clock
const CLOCK_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    SelectCategory(Category),
    ClickMarker(MarkerId),
    HoverMarker(MarkerId),
    LeaveMarker,
    ClosePanel,
    Resize(Viewport),
}

/// What the view currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub category: Category,
    pub selected_day: Option<DayKey>,
    pub selected_place: Option<String>,
    /// Marker titles, sorted
    pub markers: Vec<String>,
    pub panel: PanelContent,
}

pub struct ViewDriver<W: MapWidget> {
    view: MapView,
    map: MapHandle<W>,
    geocoding: GeocodingService,
    batches_tx: mpsc::UnboundedSender<LocationBatch>,
    batches_rx: mpsc::UnboundedReceiver<LocationBatch>,
    snapshots: watch::Sender<ViewSnapshot>,
}

impl<W: MapWidget> ViewDriver<W> {
    /// Create the map, fetch the trip documents and start resolving the
    /// travel list. Fetch failures leave the view empty.
    pub async fn start<L>(
        loader: &L,
        options: MapOptions,
        viewport: Viewport,
        data: Arc<dyn TripData>,
        geocoding: GeocodingService,
    ) -> AppResult<(Self, watch::Receiver<ViewSnapshot>)>
    where
        L: MapLoader<Widget = W>,
    {
        let map = MapHandle::init(loader, options).await?;
        let mut view = MapView::new(viewport, Local::now().time());

        let (list, schedule, accommodations) = tokio::join!(
            data.fetch_list(),
            data.fetch_schedule(),
            data.fetch_accommodations()
        );
        let list = list.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch travel list: {}", e);
            None
        });
        let schedule = schedule.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch schedule: {}", e);
            None
        });
        let accommodations = accommodations.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch accommodations: {}", e);
            None
        });

        let request = view.load_documents(
            list,
            schedule.unwrap_or_default(),
            accommodations.unwrap_or_default(),
        );

        let (batches_tx, batches_rx) = mpsc::unbounded_channel();
        let (snapshots, receiver) = watch::channel(snapshot_of(&view));
        let driver = Self {
            view,
            map,
            geocoding,
            batches_tx,
            batches_rx,
            snapshots,
        };
        if let Some(request) = request {
            driver.spawn_lookup(request);
        }
        Ok((driver, receiver))
    }

    fn spawn_lookup(&self, request: LocationRequest) {
        let geocoding = self.geocoding.clone();
        let tx = self.batches_tx.clone();
        tokio::spawn(async move {
            let (places, lodging) = tokio::join!(
                geocoding.resolve(&request.selection.titles),
                geocoding.resolve(&request.lodging)
            );
            let batch = LocationBatch {
                id: request.id,
                places: request.selection.tag(places),
                lodging,
            };
            // The receiver is gone once the view shut down
            let _ = tx.send(batch);
        });
    }

    fn handle(&mut self, command: ViewCommand) {
        tracing::debug!("View command {:?}", command);
        match command {
            ViewCommand::SelectCategory(category) => {
                if let Some(request) =
                    self.view
                        .select_category(&mut self.map, category, Instant::now())
                {
                    self.spawn_lookup(request);
                }
            }
            ViewCommand::ClickMarker(id) => {
                self.view.click_marker(&mut self.map, id);
            }
            ViewCommand::HoverMarker(id) => self.view.hover_marker(&mut self.map, id),
            ViewCommand::LeaveMarker => self.view.leave_marker(&mut self.map),
            ViewCommand::ClosePanel => self.view.close_panel(&mut self.map, Instant::now()),
            ViewCommand::Resize(viewport) => self.view.resize(viewport),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(snapshot_of(&self.view));
    }

    pub fn map(&self) -> &MapHandle<W> {
        &self.map
    }

    /// Process commands until the sender is dropped, then tear the map down
    pub async fn run(mut self, mut commands: mpsc::Receiver<ViewCommand>) {
        let mut clock = tokio::time::interval(CLOCK_REFRESH);
        clock.tick().await;

        loop {
            let deadline = self.view.next_deadline();
            let sleep_until = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(batch) = self.batches_rx.recv() => {
                    self.view.apply_locations(&mut self.map, batch);
                }
                _ = clock.tick() => self.view.set_clock(Local::now().time()),
                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    self.view.tick(&mut self.map, Instant::now());
                }
            }

            self.publish();
        }

        self.map.teardown();
        tracing::debug!("View stopped");
    }
}

fn snapshot_of(view: &MapView) -> ViewSnapshot {
    let mut markers: Vec<String> = view.marker_locations().map(|l| l.title.clone()).collect();
    markers.sort();
    ViewSnapshot {
        category: view.category(),
        selected_day: view.selected_day(),
        selected_place: view.selected_location().map(|l| l.title.clone()),
        markers,
        panel: view.panel(),
    }
}
