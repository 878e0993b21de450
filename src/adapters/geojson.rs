//! # GeoJSON Import
//!
//! Reads a GeoJSON feature collection and turns point features into
//! boards. A feature must carry a `name` property and exactly two
//! coordinates (`[longitude, latitude]`); anything else is skipped
//! with a warning, not an error.

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::core::{Board, LatLon};

/// Note attached to every imported board
const IMPORT_NOTE: &str = "Imported from OSM";

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Deserialize)]
struct Properties {
    name: Option<String>,
}

/// Import errors
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Not a GeoJSON feature collection: {0}")]
    Parse(String),
}

/// Import boards from a GeoJSON file
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<Board>, ImportError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&data)
}

/// Parse a GeoJSON feature collection into boards
///
/// Valid features become boards in document order; invalid ones are
/// logged and dropped.
pub fn parse(data: &str) -> Result<Vec<Board>, ImportError> {
    let collection: FeatureCollection =
        serde_json::from_str(data).map_err(|e| ImportError::Parse(e.to_string()))?;

    let total = collection.features.len();
    let mut boards = Vec::new();

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.name.as_deref());
        let coordinates = feature.geometry.as_ref().map(|g| g.coordinates.as_slice());

        match (name, coordinates) {
            (Some(name), Some(&[lon, lat])) => {
                boards.push(Board::new(name, IMPORT_NOTE, LatLon::new(lat, lon)));
            }
            (None, _) => warn!("Skipping feature without a name"),
            (Some(name), _) => {
                warn!("Skipping {:?}: expected exactly two coordinates", name)
            }
        }
    }

    info!("Imported {} of {} features", boards.len(), total);
    Ok(boards)
}
