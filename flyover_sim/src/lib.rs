//! Flyover Deterministic Simulation Harness
//!
//! Replays flight plans against a recording camera in virtual time, so a
//! two-minute flyover is checked in microseconds and every run is
//! reproducible from its seed.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     ScenarioRunner                        │
//! │   ScenarioId ──► FlightPlan ──► FlyoverSequencer          │
//! │                                     │                     │
//! │                          ┌──────────▼──────────┐          │
//! │                          │  RecordingAnimator  │          │
//! │                          │  (advances SimClock)│          │
//! │                          └──────────┬──────────┘          │
//! │                                     │ timeline            │
//! │                          ┌──────────▼──────────┐          │
//! │                          │       Oracle        │          │
//! │                          │ (expected calls)    │          │
//! │                          └─────────────────────┘          │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use flyover_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let result = ScenarioRunner::new(42).run(ScenarioId::GrandTour).await;
//! assert!(result.passed);
//! ```

mod context;
mod animator;
mod geocoder;
mod oracle;
mod runner;
mod exporter;
pub mod scenarios;

pub use context::SimContext;
pub use animator::{CameraEvent, CameraEventKind, RecordingAnimator};
pub use geocoder::GazetteerGeocoder;
pub use oracle::{check_timeline, expected_calls, expected_flight_time, ExpectedCall};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use exporter::TimelineExport;
