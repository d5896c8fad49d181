//! Galileo map construction and the viewport handle over it.

use galileo::galileo_types::cartesian::Point2;
use galileo::galileo_types::geo::impls::GeoPoint2d;
use galileo::galileo_types::geo::{GeoPoint, NewGeoPoint};
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::{Map, MapBuilder};
use suburbs::{AppConfig, GeoBounds, MapPosition, MapSize, Viewport, ViewportHandle};

/// Pixels kept free around a suburb when the map is fit to it.
const FIT_PADDING: u32 = 24;

/// Creates the map with the OpenStreetMap base layer, centered at the configured position.
///
/// The layer carries the OSM attribution, which `galileo-egui` draws over the map.
pub(crate) fn create_map(config: &AppConfig) -> anyhow::Result<Map> {
    let osm = RasterTileLayerBuilder::new_osm()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create OSM layer: {}", e))?;

    let [lat, lon] = config.initial_center;
    let map = MapBuilder::default()
        .with_layer(osm)
        .with_latlon(lat, lon)
        .with_resolution(config.initial_viewport().resolution)
        .build();

    Ok(map)
}

/// Live galileo map.
///
/// Sizes and screen positions are in the units galileo sizes the map in, which for
/// `galileo-egui` are egui points, not physical pixels.
pub(crate) struct GalileoViewport<'a> {
    map: &'a mut Map,
}

impl<'a> GalileoViewport<'a> {
    pub(crate) fn new(map: &'a mut Map) -> Self {
        Self { map }
    }

    /// Current size of the map view. Empty until the map has been laid out.
    pub(crate) fn size(&self) -> MapSize {
        let size = self.map.view().size();
        MapSize::new(
            size.width().max(0.0).round() as u32,
            size.height().max(0.0).round() as u32,
        )
    }

    /// Moves the map to the viewport.
    pub(crate) fn set_viewport(&mut self, viewport: &Viewport) {
        let center = GeoPoint2d::latlon(viewport.center.latitude, viewport.center.longitude);
        let view = self
            .map
            .view()
            .with_position(&center)
            .with_resolution(viewport.resolution);
        self.map.set_view(view);
        self.map.redraw();
    }

    /// Geographic position under a point given from the top left corner of the map.
    pub(crate) fn position_at(&self, x: f64, y: f64) -> Option<MapPosition> {
        self.map
            .view()
            .screen_to_map_geo(Point2::new(x, y))
            .map(|position| MapPosition::new(position.lat(), position.lon()))
    }
}

impl ViewportHandle for GalileoViewport<'_> {
    fn viewport(&self) -> Viewport {
        let view = self.map.view();
        let center = view
            .position()
            .map(|position| MapPosition::new(position.lat(), position.lon()))
            .unwrap_or_else(|| MapPosition::new(0.0, 0.0));

        Viewport {
            center,
            resolution: view.resolution(),
        }
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds) {
        let target = Viewport::fit_bounds(bounds, self.size(), FIT_PADDING);
        log::debug!(
            "Fitting map to {bounds:?}: center {:?}, resolution {}",
            target.center,
            target.resolution
        );
        self.set_viewport(&target);
    }
}
