//! Flight plans and sequencer configuration.

use flyover_env::GeoPoint;
use geo::HaversineDistance;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default camera distance from the target in meters.
pub const DEFAULT_ALTITUDE_M: f64 = 3000.0;

/// Default per-leg duration budget in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 120.0;

/// Errors raised while building a flight plan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Altitude must be a positive number of meters, got {0}")]
    InvalidAltitude(f64),

    #[error("Duration must be a positive, representable number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// An ordered path of waypoints plus the camera settings to fly it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Waypoints in flight order
    pub waypoints: Vec<GeoPoint>,

    /// Camera distance from each target in meters
    pub altitude: f64,

    /// Duration budget per leg in seconds (scaled by `FlyoverConfig::leg_fraction`)
    pub duration: f64,
}

impl FlightPlan {
    /// Creates a plan, rejecting non-positive altitude or duration.
    ///
    /// The duration must also fit in a [`Duration`].
    pub fn new(waypoints: Vec<GeoPoint>, altitude: f64, duration: f64) -> Result<Self, PlanError> {
        if !(altitude.is_finite() && altitude > 0.0) {
            return Err(PlanError::InvalidAltitude(altitude));
        }
        if !(duration > 0.0 && Duration::try_from_secs_f64(duration).is_ok()) {
            return Err(PlanError::InvalidDuration(duration));
        }

        Ok(Self {
            waypoints,
            altitude,
            duration,
        })
    }

    /// Creates a plan with the default altitude and duration.
    pub fn with_defaults(waypoints: Vec<GeoPoint>) -> Self {
        Self {
            waypoints,
            altitude: DEFAULT_ALTITUDE_M,
            duration: DEFAULT_DURATION_SECS,
        }
    }

    /// Number of legs between consecutive waypoints.
    pub fn leg_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// True when the plan has at least one leg to fly.
    pub fn is_flyable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    /// Sum of great-circle leg lengths in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|leg| {
                let a: geo::Point<f64> = leg[0].into();
                let b: geo::Point<f64> = leg[1].into();
                a.haversine_distance(&b)
            })
            .sum()
    }
}

/// Tunable constants of the flyover choreography.
#[derive(Debug, Clone)]
pub struct FlyoverConfig {
    /// Camera tilt from nadir for every pose (default: 75°)
    pub pitch: f64,

    /// Fraction of the plan duration spent traversing each leg (default: 0.75)
    pub leg_fraction: f64,

    /// Fixed duration of the turn toward the next leg (default: 5s)
    pub reorientation: Duration,

    /// Extra time an animation may overrun before failing the run (default: none)
    pub animation_timeout: Option<Duration>,

    /// Wrap headings into [0, 360) before handing them to the animator (default: true)
    pub normalize_heading: bool,
}

impl Default for FlyoverConfig {
    fn default() -> Self {
        Self {
            pitch: 75.0,
            leg_fraction: 0.75,
            reorientation: Duration::from_secs(5),
            animation_timeout: None,
            normalize_heading: true,
        }
    }
}

impl FlyoverConfig {
    /// Time spent animating one leg of `plan`.
    ///
    /// Negative or NaN budgets yield zero; budgets too large for a
    /// [`Duration`] saturate at [`Duration::MAX`].
    pub fn leg_duration(&self, plan_duration: f64) -> Duration {
        let secs = (plan_duration * self.leg_fraction).max(0.0);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_plan_validation() {
        assert!(FlightPlan::new(vec![], 3000.0, 120.0).is_ok());
        assert_eq!(
            FlightPlan::new(vec![], 0.0, 120.0),
            Err(PlanError::InvalidAltitude(0.0))
        );
        assert_eq!(
            FlightPlan::new(vec![], 500.0, -1.0),
            Err(PlanError::InvalidDuration(-1.0))
        );
        assert!(FlightPlan::new(vec![], f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_plan_rejects_unrepresentable_duration() {
        assert_eq!(
            FlightPlan::new(vec![], 3000.0, 1e20),
            Err(PlanError::InvalidDuration(1e20))
        );
        assert!(FlightPlan::new(vec![], 3000.0, f64::NAN).is_err());
        assert!(FlightPlan::new(vec![], 3000.0, f64::INFINITY).is_err());
        assert!(FlightPlan::new(vec![], 3000.0, 1e11).is_ok());
    }

    #[test]
    fn test_leg_duration_saturates() {
        let config = FlyoverConfig::default();
        assert_eq!(config.leg_duration(1e20), Duration::MAX);
        assert_eq!(config.leg_duration(f64::NAN), Duration::ZERO);
        assert_eq!(config.leg_duration(-3.0), Duration::ZERO);

        let stretched = FlyoverConfig {
            leg_fraction: 10.0,
            ..Default::default()
        };
        let plan = FlightPlan::new(vec![], 3000.0, 1.8e19).unwrap();
        assert_eq!(stretched.leg_duration(plan.duration), Duration::MAX);
    }

    #[test]
    fn test_leg_count_and_flyable() {
        let empty = FlightPlan::with_defaults(vec![]);
        assert_eq!(empty.leg_count(), 0);
        assert!(!empty.is_flyable());

        let three = FlightPlan::with_defaults(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0)]);
        assert_eq!(three.leg_count(), 2);
        assert!(three.is_flyable());
    }

    #[test]
    fn test_total_distance_one_degree_equator() {
        let plan = FlightPlan::with_defaults(vec![pt(0.0, 0.0), pt(0.0, 1.0)]);
        // One degree of arc on geo's mean earth radius (6371008.8m)
        assert_relative_eq!(plan.total_distance_m(), 111_195.08, max_relative = 1e-4);
    }

    #[test]
    fn test_default_config_leg_duration() {
        let config = FlyoverConfig::default();
        assert_eq!(config.leg_duration(120.0), Duration::from_secs(90));
        assert_eq!(config.reorientation, Duration::from_secs(5));
        assert_eq!(config.pitch, 75.0);
    }
}
