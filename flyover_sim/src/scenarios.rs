//! Named flight-plan scenarios for the simulator.

use flyover_env::GeoPoint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// No waypoints at all
    Empty,

    /// One waypoint, nothing to fly
    SingleStop,

    /// Two nearby landmarks, a single leg
    BayHop,

    /// Three cities, one turn
    WestCoast,

    /// Six stops around the globe
    GrandTour,

    /// Legs that cross the ±180° meridian
    Antimeridian,

    /// A leg that touches the north pole
    PolarRoute,

    /// Repeated waypoints (zero-length legs)
    Revisit,

    /// Seeded random tour of 2-12 waypoints
    RandomTour,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Empty,
            ScenarioId::SingleStop,
            ScenarioId::BayHop,
            ScenarioId::WestCoast,
            ScenarioId::GrandTour,
            ScenarioId::Antimeridian,
            ScenarioId::PolarRoute,
            ScenarioId::Revisit,
            ScenarioId::RandomTour,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Empty => "empty",
            ScenarioId::SingleStop => "single_stop",
            ScenarioId::BayHop => "bay_hop",
            ScenarioId::WestCoast => "west_coast",
            ScenarioId::GrandTour => "grand_tour",
            ScenarioId::Antimeridian => "antimeridian",
            ScenarioId::PolarRoute => "polar_route",
            ScenarioId::Revisit => "revisit",
            ScenarioId::RandomTour => "random_tour",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Empty => "No waypoints: completes immediately without camera calls",
            ScenarioId::SingleStop => "One waypoint: completes immediately without camera calls",
            ScenarioId::BayHop => "Golden Gate Bridge to Alcatraz, single leg",
            ScenarioId::WestCoast => "San Francisco, Los Angeles, Las Vegas with one turn",
            ScenarioId::GrandTour => "New York, London, Paris, Rome, Tokyo, Sydney",
            ScenarioId::Antimeridian => "Fiji to Samoa and back across the date line",
            ScenarioId::PolarRoute => "Oslo over the north pole to Anchorage",
            ScenarioId::Revisit => "Same waypoint twice in a row, degenerate bearings",
            ScenarioId::RandomTour => "Seeded random waypoints anywhere between 80°S and 80°N",
        }
    }

    /// Builds the waypoint list. Only `RandomTour` depends on the seed.
    pub fn waypoints(&self, seed: u64) -> Vec<GeoPoint> {
        let p = |lat: f64, lon: f64| GeoPoint { lat, lon };

        match self {
            ScenarioId::Empty => vec![],
            ScenarioId::SingleStop => vec![p(37.8199, -122.4783)],
            ScenarioId::BayHop => vec![p(37.8199, -122.4783), p(37.8270, -122.4230)],
            ScenarioId::WestCoast => vec![
                p(37.7749, -122.4194),
                p(34.0522, -118.2437),
                p(36.1699, -115.1398),
            ],
            ScenarioId::GrandTour => vec![
                p(40.7128, -74.0060),
                p(51.5074, -0.1278),
                p(48.8566, 2.3522),
                p(41.9028, 12.4964),
                p(35.6762, 139.6503),
                p(-33.8568, 151.2153),
            ],
            ScenarioId::Antimeridian => vec![
                p(-17.7134, 178.0650),
                p(-13.7590, -172.1046),
                p(-17.7134, 178.0650),
            ],
            ScenarioId::PolarRoute => vec![
                p(59.9139, 10.7522),
                p(90.0, 0.0),
                p(61.2181, -149.9003),
            ],
            ScenarioId::Revisit => vec![
                p(48.8584, 2.2945),
                p(48.8584, 2.2945),
                p(51.5074, -0.1278),
                p(51.5074, -0.1278),
            ],
            ScenarioId::RandomTour => random_tour(seed),
        }
    }
}

fn random_tour(seed: u64) -> Vec<GeoPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let count = rng.gen_range(2..=12);

    (0..count)
        .map(|_| GeoPoint {
            lat: rng.gen_range(-80.0..=80.0),
            lon: rng.gen_range(-180.0..=180.0),
        })
        .collect()
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empty" => Ok(ScenarioId::Empty),
            "single_stop" | "singlestop" => Ok(ScenarioId::SingleStop),
            "bay_hop" | "bayhop" => Ok(ScenarioId::BayHop),
            "west_coast" | "westcoast" => Ok(ScenarioId::WestCoast),
            "grand_tour" | "grandtour" => Ok(ScenarioId::GrandTour),
            "antimeridian" => Ok(ScenarioId::Antimeridian),
            "polar_route" | "polarroute" => Ok(ScenarioId::PolarRoute),
            "revisit" => Ok(ScenarioId::Revisit),
            "random_tour" | "randomtour" | "random" => Ok(ScenarioId::RandomTour),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in ScenarioId::all() {
            assert_eq!(id.name().parse::<ScenarioId>(), Ok(id));
        }
        assert!("chaos".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_waypoints_are_valid_coordinates() {
        for id in ScenarioId::all() {
            for wp in id.waypoints(7) {
                assert!(GeoPoint::new(wp.lat, wp.lon).is_ok(), "{} has {:?}", id, wp);
            }
        }
    }

    #[test]
    fn test_random_tour_is_seeded() {
        let a = ScenarioId::RandomTour.waypoints(42);
        let b = ScenarioId::RandomTour.waypoints(42);
        let c = ScenarioId::RandomTour.waypoints(43);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!((2..=12).contains(&a.len()));
    }
}
