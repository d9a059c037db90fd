//! Oracle - the ground-truth camera timeline a flight plan must produce.
//!
//! Derived directly from the choreography rules, independent of the
//! sequencer's state machine, so recorded runs can be checked against it.

use crate::animator::{CameraEvent, CameraEventKind};
use flyover_core::{initial_bearing, normalize_heading, FlightPlan, FlyoverConfig};
use flyover_env::CameraPose;
use std::time::Duration;

/// One camera call the sequencer is expected to make.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedCall {
    pub kind: CameraEventKind,
    pub pose: CameraPose,
    pub duration: Duration,
}

/// Builds the exact call list for `plan`.
///
/// Place at w0, then for each leg i an animation to w[i+1] on the leg's
/// heading, followed (except after the last leg) by a turn at w[i+1] toward
/// w[i+2].
pub fn expected_calls(plan: &FlightPlan, config: &FlyoverConfig) -> Vec<ExpectedCall> {
    let w = &plan.waypoints;
    if w.len() < 2 {
        return Vec::new();
    }

    let heading = |i: usize| {
        let raw = initial_bearing(w[i], w[i + 1]);
        if config.normalize_heading {
            normalize_heading(raw)
        } else {
            raw
        }
    };
    let pose = |at: usize, h: f64| CameraPose::looking_at(w[at], plan.altitude, config.pitch, h);
    let leg_duration = config.leg_duration(plan.duration);

    let mut calls = vec![ExpectedCall {
        kind: CameraEventKind::Place,
        pose: pose(0, heading(0)),
        duration: Duration::ZERO,
    }];

    for i in 0..w.len() - 1 {
        calls.push(ExpectedCall {
            kind: CameraEventKind::Animate,
            pose: pose(i + 1, heading(i)),
            duration: leg_duration,
        });
        if i + 2 < w.len() {
            calls.push(ExpectedCall {
                kind: CameraEventKind::Animate,
                pose: pose(i + 1, heading(i + 1)),
                duration: config.reorientation,
            });
        }
    }

    calls
}

/// Total virtual flight time for `plan`.
pub fn expected_flight_time(plan: &FlightPlan, config: &FlyoverConfig) -> Duration {
    let legs = u32::try_from(plan.leg_count()).unwrap_or(u32::MAX);
    let turns = legs.saturating_sub(1);
    config
        .leg_duration(plan.duration)
        .saturating_mul(legs)
        .saturating_add(config.reorientation.saturating_mul(turns))
}

/// Compares a recorded timeline against the oracle.
///
/// Returns a human-readable description of every mismatch.
pub fn check_timeline(
    plan: &FlightPlan,
    config: &FlyoverConfig,
    events: &[CameraEvent],
) -> Vec<String> {
    let expected = expected_calls(plan, config);
    let mut violations = Vec::new();

    if events.len() != expected.len() {
        violations.push(format!(
            "expected {} camera calls, recorded {}",
            expected.len(),
            events.len()
        ));
    }

    for (i, (want, got)) in expected.iter().zip(events).enumerate() {
        if want.kind != got.kind {
            violations.push(format!("call {}: expected {:?}, got {:?}", i, want.kind, got.kind));
        }
        if want.pose != got.pose {
            violations.push(format!(
                "call {}: expected pose {:?}, got {:?}",
                i, want.pose, got.pose
            ));
        }
        if (want.duration.as_secs_f64() - got.duration_secs).abs() > 1e-9 {
            violations.push(format!(
                "call {}: expected {:.3}s, got {:.3}s",
                i,
                want.duration.as_secs_f64(),
                got.duration_secs
            ));
        }
    }

    violations
}
