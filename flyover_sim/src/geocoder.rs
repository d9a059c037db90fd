//! Offline geocoder backed by a small built-in gazetteer.

use async_trait::async_trait;
use flyover_env::{EnvError, GeoPoint, Geocoder};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Well-known places the simulator can resolve without a network.
const GAZETTEER: &[(&str, f64, f64)] = &[
    ("golden gate bridge", 37.8199, -122.4783),
    ("alcatraz island", 37.8270, -122.4230),
    ("san francisco", 37.7749, -122.4194),
    ("los angeles", 34.0522, -118.2437),
    ("las vegas", 36.1699, -115.1398),
    ("grand canyon", 36.0544, -112.1401),
    ("new york", 40.7128, -74.0060),
    ("statue of liberty", 40.6892, -74.0445),
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
    ("eiffel tower", 48.8584, 2.2945),
    ("rome", 41.9028, 12.4964),
    ("tokyo", 35.6762, 139.6503),
    ("sydney opera house", -33.8568, 151.2153),
    ("mount everest", 27.9881, 86.9250),
];

/// Geocoder that answers from the gazetteer, case-insensitively.
///
/// Addresses can be marked offline to simulate service failures.
pub struct GazetteerGeocoder {
    places: HashMap<String, GeoPoint>,
    offline: Mutex<HashSet<String>>,
}

impl GazetteerGeocoder {
    pub fn new() -> Self {
        let places = GAZETTEER
            .iter()
            .filter_map(|(name, lat, lon)| {
                GeoPoint::new(*lat, *lon).ok().map(|p| (name.to_string(), p))
            })
            .collect();

        Self {
            places,
            offline: Mutex::new(HashSet::new()),
        }
    }

    /// Makes lookups of `address` fail with a geocoding error.
    pub fn mark_offline(&self, address: &str) {
        self.offline.lock().unwrap().insert(address.to_lowercase());
    }

    /// Names of every place the gazetteer knows, sorted.
    pub fn known_places(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.places.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for GazetteerGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for GazetteerGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<GeoPoint>, EnvError> {
        let key = address.trim().to_lowercase();
        if self.offline.lock().unwrap().contains(&key) {
            return Err(EnvError::geocoding(format!("service unavailable for '{}'", address)));
        }
        Ok(self.places.get(&key).copied())
    }
}
