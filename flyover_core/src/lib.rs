//! Flyover Core - cinematic 3D map camera paths over geocoded waypoints
//!
//! The crate has one real engine and two supporting pieces:
//! 1. **Sequencer**: walks a camera leg by leg along a flight plan, turning at each waypoint
//! 2. **Bearing**: great-circle initial course between two coordinates
//! 3. **Route / Address book**: geocodes user addresses and remembers them between sessions

pub mod bearing;
pub mod plan;
pub mod sequencer;
pub mod route;
pub mod address_book;

// Re-export key types for convenience
pub use bearing::{bearing, initial_bearing, normalize_heading};
pub use plan::{FlightPlan, FlyoverConfig, PlanError, DEFAULT_ALTITUDE_M, DEFAULT_DURATION_SECS};
pub use sequencer::{
    FlyoverError, FlyoverRun, FlyoverSequencer, FlyoverSummary, RunState, StartOutcome, Step,
    Transition,
};
pub use route::{resolve_waypoints, RouteResolution};
pub use address_book::{AddressBook, StoreError};
