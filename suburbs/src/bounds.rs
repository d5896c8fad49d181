//! Geographic bounding boxes.

/// Axis-aligned bounding box in longitude/latitude degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl GeoBounds {
    /// Creates a new bbox. The corners are normalized so that min is never greater than max.
    pub fn new(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        Self {
            min_lon: lon1.min(lon2),
            min_lat: lat1.min(lat2),
            max_lon: lon1.max(lon2),
            max_lat: lat1.max(lat2),
        }
    }

    /// Minimal bbox enclosing all the given `[lon, lat]` positions. Returns `None` for an
    /// empty iterator.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a [f64; 2]>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first[0], first[1], first[0], first[1]);
        for position in iter {
            bounds.extend_position(position[0], position[1]);
        }

        Some(bounds)
    }

    /// Grows the bbox to include the given point.
    pub fn extend_position(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    /// Smallest bbox containing both `self` and `other`.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Western edge.
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Southern edge.
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Eastern edge.
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Northern edge.
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Center of the bbox as `(lat, lon)`.
    pub fn center_latlon(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Whether the point lies inside the bbox or on its edge.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_positions_encloses_all() {
        let positions = [[151.2, -33.9], [151.3, -33.8], [151.25, -33.95]];
        let bounds = GeoBounds::from_positions(&positions).unwrap();
        assert_eq!(bounds, GeoBounds::new(151.2, -33.95, 151.3, -33.8));
        for p in &positions {
            assert!(bounds.contains(p[0], p[1]));
        }
    }

    #[test]
    fn from_positions_empty() {
        assert!(GeoBounds::from_positions(&[] as &[[f64; 2]]).is_none());
    }

    #[test]
    fn new_normalizes_corners() {
        let bounds = GeoBounds::new(10.0, 5.0, 0.0, -5.0);
        assert_eq!(bounds.min_lon(), 0.0);
        assert_eq!(bounds.max_lon(), 10.0);
        assert_eq!(bounds.min_lat(), -5.0);
        assert_eq!(bounds.max_lat(), 5.0);
        assert_eq!(bounds.center_latlon(), (0.0, 5.0));
    }

    #[test]
    fn merge() {
        let a = GeoBounds::new(0.0, 0.0, 1.0, 1.0);
        let b = GeoBounds::new(2.0, -1.0, 3.0, 0.5);
        assert_eq!(a.merge(b), GeoBounds::new(0.0, -1.0, 3.0, 1.0));
    }
}
