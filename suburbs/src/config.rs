//! Application configuration.

use std::path::Path;

use serde::Deserialize;

use crate::loader::DatasetSource;
use crate::record::AttributeKeys;
use crate::style::OverlayStyle;
use crate::viewport::{MapPosition, Viewport};

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "suburbs-map.json";

/// Default location of the suburb dataset.
pub const DEFAULT_DATASET: &str = "assets/suburb2.geojson";

/// Application settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the suburb dataset is loaded from.
    pub dataset: DatasetSource,
    /// Initial map center as `[lat, lon]`.
    pub initial_center: [f64; 2],
    /// Initial z-level.
    pub initial_zoom: u32,
    /// GeoJSON property keys.
    pub attributes: AttributeKeys,
    /// Overlay style.
    pub style: OverlayStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::parse(DEFAULT_DATASET),
            initial_center: [-33.8688, 151.2093],
            initial_zoom: 10,
            attributes: AttributeKeys::default(),
            style: OverlayStyle::default(),
        }
    }
}

impl AppConfig {
    /// Parses the configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Reads the configuration file if it exists. A missing file gives the defaults; an
    /// unreadable or malformed file is logged and also gives the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Failed to read config {}: {err}", path.display());
                return Self::default();
            }
        };

        match Self::from_json_str(&text) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Invalid config {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Viewport shown when the map view opens.
    pub fn initial_viewport(&self) -> Viewport {
        let [lat, lon] = self.initial_center;
        Viewport::with_z_level(MapPosition::new(lat, lon), self.initial_zoom)
    }
}
