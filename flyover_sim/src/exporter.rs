//! JSON exporter for recorded camera timelines.
//!
//! The export can be replayed by any renderer that understands
//! (center, distance, pitch, heading) poses.

use crate::animator::CameraEvent;
use crate::runner::ScenarioResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// Complete timeline export for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Number of waypoints in the plan
    pub waypoints: usize,

    /// Route length in kilometers
    pub distance_km: f64,

    /// Virtual duration of the whole flyover
    pub flight_time_secs: f64,

    /// All recorded camera calls
    pub events: Vec<CameraEvent>,

    /// Whether the run matched the oracle
    pub passed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl TimelineExport {
    /// Builds an export from a finished scenario run.
    pub fn from_result(result: &ScenarioResult) -> Self {
        Self {
            scenario: result.scenario.clone(),
            seed: result.seed,
            waypoints: result.waypoints,
            distance_km: result.distance_km,
            flight_time_secs: result.flight_time_secs,
            events: result.timeline.clone(),
            passed: result.passed,
            failure_reason: result.failure_reason.clone(),
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
