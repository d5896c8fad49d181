//! Ordered collection of suburb records parsed from a GeoJSON feature collection.

use std::sync::Arc;

use geojson::{FeatureCollection, GeoJson, JsonObject, Position};

use crate::bounds::GeoBounds;
use crate::error::LoadError;
use crate::record::{Polygon, Ring, SuburbGeometry, SuburbRecord};

/// Names of the coordinate reference systems that are plain longitude/latitude.
const LONLAT_CRS_SUFFIXES: &[&str] = &["CRS84", "4326", "4283", "7844"];

/// Ordered sequence of suburb records.
///
/// Records are shared behind [`Arc`], so cloning a dataset or taking a subset of it does not
/// copy any geometry.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Arc<SuburbRecord>>,
}

impl Dataset {
    /// Creates a dataset from records.
    pub fn new(records: impl IntoIterator<Item = SuburbRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parses a GeoJSON feature collection. The whole document is rejected if any feature is
    /// not a valid polygon or multipolygon.
    pub fn from_geojson_str(s: &str) -> Result<Self, LoadError> {
        Self::from_geojson(s.parse::<GeoJson>()?)
    }

    /// Same as [`Dataset::from_geojson_str`], but from raw bytes.
    pub fn from_geojson_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(geojson::Error::MalformedJson)?;
        Self::from_geojson(GeoJson::from_json_value(value)?)
    }

    /// Converts a parsed GeoJSON document.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self, LoadError> {
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(LoadError::NotFeatureCollection);
        };

        Self::from_feature_collection(collection)
    }

    fn from_feature_collection(collection: FeatureCollection) -> Result<Self, LoadError> {
        if let Some(foreign) = &collection.foreign_members {
            check_crs(foreign)?;
        }

        let mut records = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let geometry = match feature.geometry {
                Some(geometry) => convert_geometry(index, geometry.value)?,
                None => {
                    return Err(LoadError::UnsupportedGeometry {
                        index,
                        kind: "null".into(),
                    })
                }
            };
            records.push(SuburbRecord::new(
                geometry,
                feature.properties.unwrap_or_default(),
            ));
        }

        log::debug!("Parsed {} suburb features", records.len());

        Ok(Self::new(records))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in their original order.
    pub fn records(&self) -> &[Arc<SuburbRecord>] {
        &self.records
    }

    /// Iterates over the records in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &SuburbRecord> {
        self.records.iter().map(|record| record.as_ref())
    }

    /// First record.
    pub fn first(&self) -> Option<&SuburbRecord> {
        self.records.first().map(|record| record.as_ref())
    }

    /// Subset of records matching the predicate, keeping the original order.
    pub fn subset(&self, mut predicate: impl FnMut(&SuburbRecord) -> bool) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        }
    }

    /// Records whose geometry contains the point, top-most (last drawn) first.
    pub fn records_at(&self, lon: f64, lat: f64) -> impl Iterator<Item = &SuburbRecord> {
        self.records
            .iter()
            .rev()
            .map(|record| record.as_ref())
            .filter(move |record| {
                record
                    .bounds()
                    .is_some_and(|bounds| bounds.contains(lon, lat))
                    && record.geometry().contains(lon, lat)
            })
    }

    /// Bounding box of all records.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.iter()
            .filter_map(SuburbRecord::bounds)
            .reduce(GeoBounds::merge)
    }

    /// Whether every record of `self` is also a record of `other`.
    pub fn is_subset_of(&self, other: &Dataset) -> bool {
        self.records.iter().all(|record| {
            other
                .records
                .iter()
                .any(|candidate| Arc::ptr_eq(record, candidate))
        })
    }
}

fn check_crs(foreign: &JsonObject) -> Result<(), LoadError> {
    let Some(name) = foreign
        .get("crs")
        .and_then(|crs| crs.get("properties"))
        .and_then(|props| props.get("name"))
        .and_then(|name| name.as_str())
    else {
        return Ok(());
    };

    if LONLAT_CRS_SUFFIXES
        .iter()
        .any(|suffix| name.to_ascii_uppercase().ends_with(suffix))
    {
        Ok(())
    } else {
        Err(LoadError::UnsupportedCrs(name.to_string()))
    }
}

fn convert_geometry(index: usize, value: geojson::Value) -> Result<SuburbGeometry, LoadError> {
    let parts = match value {
        geojson::Value::Polygon(rings) => vec![convert_polygon(index, rings)?],
        geojson::Value::MultiPolygon(polygons) => polygons
            .into_iter()
            .map(|rings| convert_polygon(index, rings))
            .collect::<Result<_, _>>()?,
        other => {
            return Err(LoadError::UnsupportedGeometry {
                index,
                kind: geometry_kind(&other).into(),
            })
        }
    };

    Ok(SuburbGeometry::new(parts))
}

fn convert_polygon(index: usize, rings: Vec<Vec<Position>>) -> Result<Polygon, LoadError> {
    let mut rings = rings.into_iter().map(|ring| convert_ring(index, ring));
    let exterior = rings
        .next()
        .unwrap_or(Err(LoadError::InvalidGeometry {
            index,
            positions: 0,
        }))?;
    let holes = rings.collect::<Result<_, _>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn convert_ring(index: usize, ring: Vec<Position>) -> Result<Ring, LoadError> {
    let positions = ring.len();
    let invalid = || LoadError::InvalidGeometry { index, positions };
    if positions < 3 {
        return Err(invalid());
    }

    ring.into_iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok([*lon, *lat]),
            _ => Err(invalid()),
        })
        .collect()
}

fn geometry_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}
