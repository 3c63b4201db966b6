//! Owned map widget handle
//!
//! A view creates exactly one [`MapHandle`] through [`MapHandle::init`] and
//! passes it by reference to every state transition. Dropping the handle
//! removes the markers and destroys the widget.

use std::collections::HashMap;

use super::widget::{LatLng, MapLoader, MapOptions, MapWidget, MarkerId, MarkerSpec};
use crate::error::AppResult;

/// Re-centre `map` so that `reference` stays visible next to a panel.
///
/// The reference point is projected to the container, shifted by half of each
/// offset (right for `left_offset`, up for `bottom_offset`), and the shifted
/// point becomes the new centre.
pub fn move_to_visible_center<W: MapWidget + ?Sized>(
    map: &mut W,
    reference: LatLng,
    left_offset: f64,
    bottom_offset: f64,
) {
    let mut point = map.container_point(reference);
    point.x += left_offset / 2.0;
    point.y -= bottom_offset / 2.0;
    let adjusted = map.coords_at(point);
    map.set_center(adjusted);
}

pub struct MapHandle<W: MapWidget> {
    widget: W,
    reference: LatLng,
    markers: HashMap<MarkerId, MarkerSpec>,
    ready: bool,
}

impl<W: MapWidget> MapHandle<W> {
    /// Load the widget and position it on the configured centre
    pub async fn init<L>(loader: &L, options: MapOptions) -> AppResult<Self>
    where
        L: MapLoader<Widget = W>,
    {
        let mut widget = loader.load(&options).await?;
        widget.set_center(options.center);
        widget.set_level(options.level);
        tracing::info!(
            "Map ready at {:.4},{:.4} level {}",
            options.center.lat,
            options.center.lng,
            options.level
        );

        Ok(Self {
            widget,
            reference: options.center,
            markers: HashMap::new(),
            ready: true,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Swap every marker for `specs`; ids come back in `specs` order
    pub fn replace_markers(&mut self, specs: Vec<MarkerSpec>) -> Vec<MarkerId> {
        self.clear_markers();
        specs
            .into_iter()
            .map(|spec| {
                let id = self.widget.add_marker(&spec);
                self.markers.insert(id, spec);
                id
            })
            .collect()
    }

    pub fn clear_markers(&mut self) {
        for (id, _) in self.markers.drain() {
            self.widget.remove_marker(id);
        }
    }

    pub fn move_to_visible_center(&mut self, left_offset: f64, bottom_offset: f64) {
        move_to_visible_center(&mut self.widget, self.reference, left_offset, bottom_offset);
    }

    /// Centre on the point `dx`/`dy` pixels away from `coord`
    pub fn center_beside(&mut self, coord: LatLng, dx: f64, dy: f64) {
        let mut point = self.widget.container_point(coord);
        point.x += dx;
        point.y += dy;
        let target = self.widget.coords_at(point);
        self.widget.set_center(target);
    }

    pub fn open_info(&mut self, id: MarkerId) {
        if let Some(spec) = self.markers.get(&id) {
            let content = format!(
                r#"<div style="padding:6px 12px;font-size:13px;">{}</div>"#,
                spec.title
            );
            self.widget.open_info(id, &content);
        }
    }

    pub fn close_info(&mut self) {
        self.widget.close_info();
    }

    /// Remove markers and destroy the widget. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.ready {
            return;
        }
        self.clear_markers();
        self.widget.close_info();
        self.widget.destroy();
        self.ready = false;
        tracing::debug!("Map torn down");
    }
}

impl<W: MapWidget> Drop for MapHandle<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}
