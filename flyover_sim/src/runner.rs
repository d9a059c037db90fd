//! Scenario runner - flies plans against the recording animator and
//! checks them against the oracle.

use crate::animator::{CameraEvent, RecordingAnimator};
use crate::context::SimContext;
use crate::oracle::{check_timeline, expected_flight_time};
use crate::scenarios::ScenarioId;

use flyover_core::{FlightPlan, FlyoverConfig, FlyoverSequencer, StartOutcome};
use flyover_env::GeoPoint;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario (or ad-hoc route) name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Whether the run matched the oracle on both passes
    pub passed: bool,

    /// Number of waypoints in the plan
    pub waypoints: usize,

    /// Legs flown on the second pass
    pub legs: usize,

    /// Turns flown on the second pass
    pub reorientations: usize,

    /// Great-circle route length in kilometers
    pub distance_km: f64,

    /// Virtual time the flyover took in seconds
    pub flight_time_secs: f64,

    /// Failure message if any
    pub failure_reason: Option<String>,

    /// Recorded camera calls of the first pass
    pub timeline: Vec<CameraEvent>,
}

/// Runs flight-plan scenarios in virtual time.
pub struct ScenarioRunner {
    /// Seed for randomized scenarios
    seed: u64,

    /// Camera distance in meters
    altitude: f64,

    /// Plan duration in seconds
    duration: f64,

    /// Sequencer configuration
    config: FlyoverConfig,
}

impl ScenarioRunner {
    /// Creates a new scenario runner with the default plan settings.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            altitude: flyover_core::DEFAULT_ALTITUDE_M,
            duration: flyover_core::DEFAULT_DURATION_SECS,
            config: FlyoverConfig::default(),
        }
    }

    /// Sets the camera altitude.
    pub fn with_altitude(mut self, meters: f64) -> Self {
        self.altitude = meters;
        self
    }

    /// Sets the plan duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    /// Sets the sequencer configuration.
    pub fn with_config(mut self, config: FlyoverConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs a named scenario.
    pub async fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        debug!("  {}", scenario.description());
        self.run_waypoints(scenario.name(), scenario.waypoints(self.seed)).await
    }

    /// Runs an arbitrary waypoint list.
    ///
    /// The plan is flown twice on fresh clocks: once through the callback
    /// surface and once through `run`. Both timelines must match the oracle
    /// and each other.
    pub async fn run_waypoints(&self, name: &str, waypoints: Vec<GeoPoint>) -> ScenarioResult {
        let mut result = ScenarioResult {
            scenario: name.to_string(),
            seed: self.seed,
            passed: false,
            waypoints: waypoints.len(),
            legs: 0,
            reorientations: 0,
            distance_km: 0.0,
            flight_time_secs: 0.0,
            failure_reason: None,
            timeline: Vec::new(),
        };

        let plan = match FlightPlan::new(waypoints, self.altitude, self.duration) {
            Ok(plan) => plan,
            Err(e) => {
                result.failure_reason = Some(e.to_string());
                return result;
            }
        };
        result.distance_km = plan.total_distance_m() / 1000.0;

        let mut violations = Vec::new();

        // Pass 1: callback surface
        let (first, flight_time) = match self.fly_with_callback(&plan).await {
            Ok(pass) => pass,
            Err(reason) => {
                result.failure_reason = Some(reason);
                return result;
            }
        };
        violations.extend(check_timeline(&plan, &self.config, &first));

        let expected_time = expected_flight_time(&plan, &self.config).as_secs_f64();
        if (flight_time - expected_time).abs() > 1e-6 {
            violations.push(format!(
                "flight took {:.3}s of virtual time, expected {:.3}s",
                flight_time, expected_time
            ));
        }

        // Pass 2: async surface, must reproduce pass 1 exactly
        let context = SimContext::shared();
        let animator = Arc::new(RecordingAnimator::new(Arc::clone(&context)));
        let sequencer = FlyoverSequencer::new(context, Arc::clone(&animator), self.config.clone());

        match sequencer.run(&plan).await {
            Ok(summary) => {
                result.legs = summary.legs;
                result.reorientations = summary.reorientations;
            }
            Err(e) => violations.push(format!("second pass failed: {}", e)),
        }
        if animator.events() != first {
            violations.push("second pass produced a different timeline".to_string());
        }

        result.flight_time_secs = flight_time;
        result.timeline = first;
        result.passed = violations.is_empty();
        if !result.passed {
            result.failure_reason = Some(violations.join("; "));
        }

        debug!(
            "  {} waypoints | {} legs | {} turns | {:.1} km | {:.1}s",
            result.waypoints,
            result.legs,
            result.reorientations,
            result.distance_km,
            result.flight_time_secs
        );

        result
    }

    async fn fly_with_callback(
        &self,
        plan: &FlightPlan,
    ) -> Result<(Vec<CameraEvent>, f64), String> {
        let context = SimContext::shared();
        let animator = Arc::new(RecordingAnimator::new(Arc::clone(&context)));
        let sequencer =
            FlyoverSequencer::new(Arc::clone(&context), Arc::clone(&animator), self.config.clone());

        let (tx, rx) = oneshot::channel();
        let outcome = sequencer.start(plan, move || {
            let _ = tx.send(());
        });

        let expected_outcome = if plan.is_flyable() {
            StartOutcome::Started
        } else {
            StartOutcome::CompletedImmediately
        };
        if outcome != expected_outcome {
            return Err(format!("start returned {:?}, expected {:?}", outcome, expected_outcome));
        }

        rx.await
            .map_err(|_| "completion callback was dropped without firing".to_string())?;

        if sequencer.is_active() {
            return Err("sequencer still active after completion".to_string());
        }

        Ok((animator.events(), context.now_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::CameraEventKind;

    #[tokio::test]
    async fn test_all_scenarios_pass() {
        let runner = ScenarioRunner::new(42);

        for scenario in ScenarioId::all() {
            let result = runner.run(scenario).await;
            assert!(result.passed, "{} failed: {:?}", scenario, result.failure_reason);
        }
    }

    #[tokio::test]
    async fn test_short_plans_issue_no_calls() {
        let runner = ScenarioRunner::new(1);

        for scenario in [ScenarioId::Empty, ScenarioId::SingleStop] {
            let result = runner.run(scenario).await;
            assert!(result.passed);
            assert!(result.timeline.is_empty());
            assert_eq!(result.flight_time_secs, 0.0);
        }
    }

    #[tokio::test]
    async fn test_west_coast_shape() {
        let result = ScenarioRunner::new(1).run(ScenarioId::WestCoast).await;

        assert!(result.passed);
        assert_eq!(result.legs, 2);
        assert_eq!(result.reorientations, 1);
        assert_eq!(result.timeline.len(), 4);
        assert_eq!(result.timeline[0].kind, CameraEventKind::Place);
        assert_eq!(result.timeline[2].duration_secs, 5.0);
        assert_eq!(result.flight_time_secs, 185.0);
    }

    #[tokio::test]
    async fn test_custom_duration_and_altitude() {
        let runner = ScenarioRunner::new(1).with_duration(40.0).with_altitude(500.0);
        let result = runner.run(ScenarioId::BayHop).await;

        assert!(result.passed);
        assert_eq!(result.timeline[1].duration_secs, 30.0);
        assert!(result.timeline.iter().all(|e| e.pose.distance == 500.0));
    }

    #[tokio::test]
    async fn test_century_long_legs_match_oracle() {
        let result = ScenarioRunner::new(1)
            .with_duration(1e11)
            .run(ScenarioId::BayHop)
            .await;

        assert!(result.passed, "{:?}", result.failure_reason);
        assert_eq!(result.flight_time_secs, 75_000_000_000.0);
    }

    #[tokio::test]
    async fn test_unrepresentable_duration_is_reported() {
        let result = ScenarioRunner::new(1)
            .with_duration(1e20)
            .run(ScenarioId::BayHop)
            .await;

        assert!(!result.passed);
        assert!(result.failure_reason.unwrap().contains("Duration"));
    }

    #[tokio::test]
    async fn test_invalid_plan_is_reported() {
        let result = ScenarioRunner::new(1)
            .with_altitude(-5.0)
            .run(ScenarioId::BayHop)
            .await;

        assert!(!result.passed);
        assert!(result.failure_reason.unwrap().contains("Altitude"));
    }

    #[tokio::test]
    async fn test_interrupted_animation_releases_sequencer() {
        let context = SimContext::shared();
        let animator = Arc::new(RecordingAnimator::new(Arc::clone(&context)));
        animator.fail_animation(1);
        let sequencer = FlyoverSequencer::new(
            Arc::clone(&context),
            Arc::clone(&animator),
            FlyoverConfig::default(),
        );
        let plan = FlightPlan::with_defaults(ScenarioId::GrandTour.waypoints(0));

        let (tx, rx) = oneshot::channel();
        let outcome = sequencer.start(&plan, move || {
            let _ = tx.send(());
        });
        assert_eq!(outcome, StartOutcome::Started);
        rx.await.unwrap();

        // Placement, first leg, interrupted turn
        assert_eq!(animator.events().len(), 3);
        assert_eq!(context.now_secs(), 90.0);
        assert!(!sequencer.is_active());
        assert!(!check_timeline(&plan, &FlyoverConfig::default(), &animator.events()).is_empty());
    }
}
