//! Flyover Environment Abstraction Layer
//!
//! This crate provides the "Sans-IO" boundary that lets the flyover
//! sequencer run against a real map view (production) or a recording,
//! virtual-clock harness (simulation).
//!
//! # Core Concept: Collaborators, not Platforms
//!
//! The sequencer never talks to a map SDK directly. Everything it touches
//! goes through a trait:
//! - Time and task spawning (`FlyoverContext`)
//! - Camera placement and animation (`CameraAnimator`)
//! - Address lookup (`Geocoder`)
//!
//! # Example
//!
//! ```ignore
//! use flyover_env::{CameraAnimator, CameraPose, GeoPoint};
//! use std::time::Duration;
//!
//! async fn pan<A: CameraAnimator>(animator: &A, pose: CameraPose) {
//!     animator.set_pose_immediate(pose);
//!     let _ = animator.animate_pose(pose, Duration::from_secs(5)).await;
//! }
//! ```

mod context;
mod animator;
mod geocoder;
mod types;
mod error;
mod tokio_impl;

pub use context::FlyoverContext;
pub use animator::CameraAnimator;
pub use geocoder::Geocoder;
pub use types::{CameraPose, GeoPoint};
pub use error::EnvError;
pub use tokio_impl::TokioContext;
