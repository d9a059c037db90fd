//! Turning a list of typed addresses into flyover waypoints.

use flyover_env::{GeoPoint, Geocoder};
use tracing::{debug, warn};

/// Outcome of geocoding an address list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteResolution {
    /// Coordinates of every address that resolved, in input order
    pub waypoints: Vec<GeoPoint>,

    /// Addresses that failed or had no match
    pub unresolved: Vec<String>,
}

impl RouteResolution {
    /// True when enough addresses resolved to fly at least one leg.
    pub fn is_flyable(&self) -> bool {
        self.waypoints.len() >= 2
    }
}

/// Geocodes `addresses` one at a time, in order.
///
/// Blank entries are skipped without a request. A failed lookup or an
/// empty answer drops that address from the route instead of aborting it.
pub async fn resolve_waypoints<G, S>(geocoder: &G, addresses: &[S]) -> RouteResolution
where
    G: Geocoder,
    S: AsRef<str>,
{
    let mut resolution = RouteResolution::default();

    for address in addresses {
        let address = address.as_ref().trim();
        if address.is_empty() {
            continue;
        }

        match geocoder.resolve(address).await {
            Ok(Some(point)) => {
                debug!("Resolved '{}' to {}", address, point);
                resolution.waypoints.push(point);
            }
            Ok(None) => {
                debug!("No match for address '{}'", address);
                resolution.unresolved.push(address.to_string());
            }
            Err(e) => {
                warn!("Error geocoding address '{}': {}", address, e);
                resolution.unresolved.push(address.to_string());
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flyover_env::EnvError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct TableGeocoder {
        table: HashMap<&'static str, GeoPoint>,
        requests: Mutex<Vec<String>>,
    }

    impl TableGeocoder {
        fn new() -> Self {
            let mut table = HashMap::new();
            table.insert("paris", GeoPoint::new(48.8566, 2.3522).unwrap());
            table.insert("berlin", GeoPoint::new(52.52, 13.405).unwrap());
            table.insert("rome", GeoPoint::new(41.9028, 12.4964).unwrap());
            Self {
                table,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Geocoder for TableGeocoder {
        async fn resolve(&self, address: &str) -> Result<Option<GeoPoint>, EnvError> {
            self.requests.lock().unwrap().push(address.to_string());
            if address == "offline" {
                return Err(EnvError::geocoding("network unreachable"));
            }
            Ok(self.table.get(address).copied())
        }
    }

    #[tokio::test]
    async fn test_resolves_in_order() {
        let geocoder = TableGeocoder::new();
        let route = resolve_waypoints(&geocoder, &["rome", "paris", "berlin"]).await;

        assert_eq!(
            route.waypoints,
            vec![
                geocoder.table["rome"],
                geocoder.table["paris"],
                geocoder.table["berlin"],
            ]
        );
        assert!(route.unresolved.is_empty());
        assert!(route.is_flyable());
    }

    #[tokio::test]
    async fn test_failures_are_skipped_not_fatal() {
        let geocoder = TableGeocoder::new();
        let addresses = vec![
            "paris".to_string(),
            "offline".to_string(),
            "atlantis".to_string(),
            "berlin".to_string(),
        ];

        let route = resolve_waypoints(&geocoder, &addresses).await;

        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.unresolved, vec!["offline", "atlantis"]);
        assert!(route.is_flyable());
    }

    #[tokio::test]
    async fn test_blank_addresses_are_not_requested() {
        let geocoder = TableGeocoder::new();
        let route = resolve_waypoints(&geocoder, &["", "  ", "paris"]).await;

        assert_eq!(route.waypoints.len(), 1);
        assert!(!route.is_flyable());
        assert_eq!(*geocoder.requests.lock().unwrap(), vec!["paris".to_string()]);
    }
}
