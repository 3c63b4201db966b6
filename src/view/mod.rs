//! Interactive trip map
//!
//! [`widget`] abstracts the map SDK, [`map::MapHandle`] owns one widget,
//! [`state::MapView`] holds selection and panel state, and
//! [`driver::ViewDriver`] runs it all against the trip API.

pub mod driver;
pub mod map;
pub mod state;
pub mod widget;

#[cfg(test)]
mod testing;

pub use driver::{ViewCommand, ViewDriver, ViewSnapshot};
pub use map::MapHandle;
pub use state::{MapView, PanelContent, Viewport};
