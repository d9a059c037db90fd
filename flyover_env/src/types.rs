//! Common types for the Flyover environment abstraction.

use crate::error::EnvError;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// [`GeoPoint::new`] and deserialization keep latitude within [-90, 90] and
/// longitude within [-180, 180]. Struct literals bypass the check and are
/// meant for known-good constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    /// Latitude in degrees (positive north)
    pub lat: f64,

    /// Longitude in degrees (positive east)
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self, EnvError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(EnvError::InvalidCoordinate { lat, lon })
        }
    }
}

/// Unchecked wire form of [`GeoPoint`].
#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = EnvError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        // geo uses (x, y) = (lon, lat)
        geo::Point::new(p.lon, p.lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// One instantaneous 3D map camera configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Point the camera looks at
    pub center: GeoPoint,

    /// Distance from the center point in meters
    pub distance: f64,

    /// Tilt from nadir in degrees
    pub pitch: f64,

    /// Compass heading in degrees (clockwise from north)
    pub heading: f64,
}

impl CameraPose {
    /// Creates a pose looking at `center` from `distance` meters away.
    pub fn looking_at(center: GeoPoint, distance: f64, pitch: f64, heading: f64) -> Self {
        Self {
            center,
            distance,
            pitch,
            heading,
        }
    }
}
