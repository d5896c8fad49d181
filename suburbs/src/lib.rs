//! Core of the Australian Suburbs Map.
//!
//! This crate has no UI dependencies. It knows how to load the suburb dataset from a GeoJSON
//! file or URL ([`loader`]), search it by name ([`search`]), format the information popup of a
//! suburb ([`popup`]) and compute the viewport that frames a suburb ([`viewport`]). The
//! [`MapViewModel`] ties these together into the state of one map view.
//!
//! ```no_run
//! use suburbs::{AppConfig, MapViewModel, PendingLoad};
//!
//! let config = AppConfig::default();
//! let mut model = MapViewModel::new(config.attributes.clone());
//! let mut pending = PendingLoad::spawn(config.dataset.loader(), || {});
//! loop {
//!     if let Some(result) = pending.poll() {
//!         model.finish_load(result);
//!         break;
//!     }
//! }
//! println!("{} suburbs", model.full().len());
//! ```

pub mod bounds;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod popup;
pub mod record;
pub mod route;
pub mod search;
pub mod style;
pub mod view_model;
pub mod viewport;

pub use bounds::GeoBounds;
pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::LoadError;
pub use loader::{DatasetLoader, DatasetSource, FileLoader, HttpLoader, PendingLoad};
pub use popup::PopupContent;
pub use record::{AttributeKeys, SuburbRecord};
pub use route::{Navigator, Route};
pub use style::OverlayStyle;
pub use view_model::{LoadState, MapViewModel, SearchOutcome};
pub use viewport::{MapPosition, MapSize, Viewport, ViewportHandle};
