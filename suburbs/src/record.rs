//! Suburb records: polygon geometry plus a flat attribute bag.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::bounds::GeoBounds;

/// Closed ring of `[lon, lat]` positions.
pub type Ring = Vec<[f64; 2]>;

/// Polygon as an exterior ring followed by zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Interior rings.
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Bounding box of the exterior ring.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_positions(&self.exterior)
    }

    /// Even-odd containment test. Points inside a hole are outside the polygon.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        ring_contains(&self.exterior, lon, lat)
            && !self.holes.iter().any(|hole| ring_contains(hole, lon, lat))
    }
}

fn ring_contains(ring: &[[f64; 2]], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Geometry of one suburb. A plain polygon is stored as a single part.
#[derive(Debug, Clone, PartialEq)]
pub struct SuburbGeometry {
    parts: Vec<Polygon>,
}

impl SuburbGeometry {
    /// Creates a geometry from its polygon parts.
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }

    /// Polygon parts.
    pub fn parts(&self) -> &[Polygon] {
        &self.parts
    }

    /// Bounding box of all parts, `None` if the geometry has no positions.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.parts
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(GeoBounds::merge)
    }

    /// Whether any part contains the point.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.parts.iter().any(|part| part.contains(lon, lat))
    }
}

/// GeoJSON property keys of the well-known suburb attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttributeKeys {
    /// Suburb display name.
    pub name: String,
    /// Location identifier.
    pub location_id: String,
    /// Polygon identifier.
    pub polygon_id: String,
    /// Creation date.
    pub created: String,
    /// Region name.
    pub region: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            name: "nsw_loca_2".into(),
            location_id: "nsw_loca_1".into(),
            polygon_id: "lc_ply_pid".into(),
            created: "dt_create".into(),
            region: "nsw_loca_5".into(),
        }
    }
}

/// One suburb: polygon geometry and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SuburbRecord {
    geometry: SuburbGeometry,
    properties: Map<String, Value>,
}

impl SuburbRecord {
    /// Creates a new record.
    pub fn new(geometry: SuburbGeometry, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Record geometry.
    pub fn geometry(&self) -> &SuburbGeometry {
        &self.geometry
    }

    /// Raw attribute bag.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Text of the attribute, or `None` if it is absent.
    ///
    /// Missing keys, `null` and blank strings are all treated as absent. Non-string values are
    /// rendered as their JSON text.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.properties.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Display name of the suburb.
    pub fn name(&self, keys: &AttributeKeys) -> Option<Cow<'_, str>> {
        self.attribute(&keys.name)
    }

    /// Bounding box of the record geometry.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.geometry.bounds()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![[min, min], [max, min], [max, max], [min, max], [min, min]]
    }

    fn record(properties: Value) -> SuburbRecord {
        let Value::Object(properties) = properties else {
            panic!("properties must be an object");
        };
        SuburbRecord::new(
            SuburbGeometry::new(vec![Polygon::new(square(0.0, 1.0), vec![])]),
            properties,
        )
    }

    #[test]
    fn polygon_contains_with_hole() {
        let polygon = Polygon::new(square(0.0, 10.0), vec![square(4.0, 6.0)]);
        assert!(polygon.contains(1.0, 1.0));
        assert!(polygon.contains(8.0, 5.0));
        assert!(!polygon.contains(5.0, 5.0));
        assert!(!polygon.contains(11.0, 5.0));
        assert!(!polygon.contains(-0.5, 5.0));
    }

    #[test]
    fn multi_part_bounds() {
        let geometry = SuburbGeometry::new(vec![
            Polygon::new(square(0.0, 1.0), vec![]),
            Polygon::new(square(5.0, 7.0), vec![]),
        ]);
        assert_eq!(geometry.bounds(), Some(GeoBounds::new(0.0, 0.0, 7.0, 7.0)));
        assert!(geometry.contains(6.0, 6.0));
        assert!(!geometry.contains(3.0, 3.0));
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert_eq!(SuburbGeometry::new(vec![]).bounds(), None);
    }

    #[test]
    fn attribute_absent_values() {
        let record = record(json!({
            "null": null,
            "empty": "",
            "blank": "   ",
            "text": "BONDI",
            "number": 4025,
            "flag": true,
        }));

        assert_eq!(record.attribute("missing"), None);
        assert_eq!(record.attribute("null"), None);
        assert_eq!(record.attribute("empty"), None);
        assert_eq!(record.attribute("blank"), None);
        assert_eq!(record.attribute("text").as_deref(), Some("BONDI"));
        assert_eq!(record.attribute("number").as_deref(), Some("4025"));
        assert_eq!(record.attribute("flag").as_deref(), Some("true"));
    }

    #[test]
    fn name_uses_configured_key() {
        let record = record(json!({ "nsw_loca_2": "MANLY", "title": "Other" }));
        assert_eq!(record.name(&AttributeKeys::default()).as_deref(), Some("MANLY"));

        let keys = AttributeKeys {
            name: "title".into(),
            ..Default::default()
        };
        assert_eq!(record.name(&keys).as_deref(), Some("Other"));
    }
}
