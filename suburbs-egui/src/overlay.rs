//! Suburb polygons as a galileo feature layer.

use galileo::galileo_types::cartesian::Point2;
use galileo::galileo_types::geo::Crs;
use galileo::galileo_types::impls::{ClosedContour, MultiPolygon, Polygon};
use galileo::layer::feature_layer::{Feature, FeatureLayer};
use galileo::symbol::SimplePolygonSymbol;
use galileo::{Color, Map};
use suburbs::record::Ring;
use suburbs::{Dataset, MapPosition, OverlayStyle, SuburbRecord};

/// Number of layers below the overlay (the OSM base layer).
const BASE_LAYERS: usize = 1;

/// One suburb polygon projected to Web Mercator.
pub(crate) struct SuburbFeature {
    geometry: MultiPolygon<Point2>,
}

impl SuburbFeature {
    pub(crate) fn from_record(record: &SuburbRecord) -> Self {
        let parts = record
            .geometry()
            .parts()
            .iter()
            .map(|part| {
                Polygon::new(
                    project_ring(part.exterior()),
                    part.holes().iter().map(|hole| project_ring(hole)).collect(),
                )
            })
            .collect();

        Self {
            geometry: MultiPolygon { parts },
        }
    }
}

impl Feature for SuburbFeature {
    type Geom = MultiPolygon<Point2>;

    fn geometry(&self) -> &Self::Geom {
        &self.geometry
    }
}

/// GeoJSON rings repeat the first position at the end, galileo contours don't.
fn project_ring(ring: &Ring) -> ClosedContour<Point2> {
    let open = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => &ring[..],
    };

    ClosedContour::new(
        open.iter()
            .map(|&[lon, lat]| {
                let [x, y] = MapPosition::new(lat, lon).project();
                Point2::new(x, y)
            })
            .collect(),
    )
}

fn symbol(style: &OverlayStyle) -> SimplePolygonSymbol {
    let [r, g, b, a] = style.fill_rgba();
    let [sr, sg, sb, sa] = style.stroke_rgba();
    SimplePolygonSymbol::new(Color::rgba(r, g, b, a))
        .with_stroke_color(Color::rgba(sr, sg, sb, sa))
        .with_stroke_width(style.stroke_width)
}

/// Replaces the overlay with one polygon per record of the dataset. An empty dataset only
/// removes the old overlay.
pub(crate) fn replace_overlay(map: &mut Map, dataset: &Dataset, style: &OverlayStyle) {
    clear_overlay(map);

    if !dataset.is_empty() {
        let features: Vec<SuburbFeature> = dataset.iter().map(SuburbFeature::from_record).collect();
        log::debug!("Drawing {} suburb polygons", features.len());

        let layer = FeatureLayer::new(features, symbol(style), Crs::EPSG3857);
        map.layers_mut().push(layer);
    }

    map.redraw();
}

/// Removes the overlay, keeping the base layer.
pub(crate) fn clear_overlay(map: &mut Map) {
    map.layers_mut().truncate(BASE_LAYERS);
}
