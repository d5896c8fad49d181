//! Error types.

use thiserror::Error;

/// Error that can occur when loading the suburb dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The request to the remote server failed.
    #[error("failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote server answered with a non-success status.
    #[error("dataset request returned status {0}")]
    Status(u16),

    /// The content is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    /// The document is valid GeoJSON, but not a feature collection.
    #[error("expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// A feature has no geometry, or a geometry that is not a polygon.
    #[error("feature {index} has unsupported geometry: {kind}")]
    UnsupportedGeometry {
        /// Position of the feature in the collection.
        index: usize,
        /// Geometry type name, or `null` when the geometry is missing.
        kind: String,
    },

    /// A polygon ring does not have enough positions.
    #[error("feature {index} has a ring with {positions} positions")]
    InvalidGeometry {
        /// Position of the feature in the collection.
        index: usize,
        /// Number of positions in the offending ring.
        positions: usize,
    },

    /// The background load stopped without producing a result.
    #[error("dataset load was interrupted")]
    Interrupted,

    /// The document declares a coordinate reference system other than lon/lat.
    #[error("unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),
}
