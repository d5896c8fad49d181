//! Map viewport: center and resolution in the Web Mercator projection.

use crate::bounds::GeoBounds;

/// Radius of the Web Mercator sphere, metres.
const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Resolution of z-level 0 for 256px tiles, metres per pixel.
pub const TOP_RESOLUTION: f64 = 156_543.033_928_000_14;

/// Deepest zoom a bounds fit may request. Keeps point-like suburbs from zooming in endlessly.
pub const MAX_FIT_Z_LEVEL: u32 = 18;

/// Geographic position with latitude and longitude coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    /// Latitude, degrees.
    pub latitude: f64,
    /// Longitude, degrees.
    pub longitude: f64,
}

impl MapPosition {
    /// Creates a new position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Projects the position to Web Mercator metres.
    pub fn project(&self) -> [f64; 2] {
        let lat = self.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = EARTH_RADIUS * self.longitude.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
        [x, y]
    }

    /// Inverse of [`MapPosition::project`].
    pub fn unproject([x, y]: [f64; 2]) -> Self {
        let longitude = (x / EARTH_RADIUS).to_degrees();
        let latitude = (2.0 * (y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        Self {
            latitude,
            longitude,
        }
    }
}

/// Size of the map in the pixels its resolution is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl MapSize {
    /// Creates a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the map has no visible area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Visible map region as center plus resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Center of the map.
    pub center: MapPosition,
    /// Map metres per pixel.
    pub resolution: f64,
}

impl Viewport {
    /// Creates a viewport centered at the given position with the resolution of the z-level.
    pub fn with_z_level(center: MapPosition, z_level: u32) -> Self {
        Self {
            center,
            resolution: resolution_for_z_level(z_level),
        }
    }

    /// Smallest viewport of the given size that shows the whole bbox, leaving `padding` pixels
    /// free on every side.
    pub fn fit_bounds(bounds: &GeoBounds, size: MapSize, padding: u32) -> Self {
        let [x_min, y_min] = MapPosition::new(bounds.min_lat(), bounds.min_lon()).project();
        let [x_max, y_max] = MapPosition::new(bounds.max_lat(), bounds.max_lon()).project();

        let usable_width = (size.width.saturating_sub(2 * padding)).max(1) as f64;
        let usable_height = (size.height.saturating_sub(2 * padding)).max(1) as f64;
        let resolution = ((x_max - x_min) / usable_width)
            .max((y_max - y_min) / usable_height)
            .max(resolution_for_z_level(MAX_FIT_Z_LEVEL));

        Self {
            center: MapPosition::unproject([(x_min + x_max) / 2.0, (y_min + y_max) / 2.0]),
            resolution,
        }
    }
}

/// Resolution of the z-level for 256px tiles.
pub fn resolution_for_z_level(z_level: u32) -> f64 {
    TOP_RESOLUTION / 2f64.powi(z_level as i32)
}

/// Handle to a live map that a search can move.
pub trait ViewportHandle {
    /// Current viewport.
    fn viewport(&self) -> Viewport;

    /// Adjusts the viewport to the minimal region enclosing the bbox.
    fn fit_bounds(&mut self, bounds: &GeoBounds);
}
