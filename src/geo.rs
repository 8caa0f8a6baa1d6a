use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat: {} lon: {}", self.lat, self.lon)
    }
}

/// A scanned file and, if its metadata carried a usable geotag, where it was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGeoReference {
    path: PathBuf,
    position: Option<Position>,
}

impl ImageGeoReference {
    pub fn valid(path: impl Into<PathBuf>, position: Position) -> Self {
        Self {
            path: path.into(),
            position: Some(position),
        }
    }

    pub fn invalid(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            position: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_invalid(&self) -> bool {
        self.position.is_none()
    }
}

/// Converts degrees, minutes and seconds to decimal degrees.
///
/// The sign of `d` carries through unchanged; hemisphere letters are not
/// consulted here.
pub fn dms_to_dd(d: f64, m: f64, s: f64) -> f64 {
    d + m / 60.0 + s / 3600.0
}
