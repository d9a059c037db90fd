//! Camera animator abstraction (stands in for the platform map view).

use async_trait::async_trait;
use crate::error::EnvError;
use crate::types::CameraPose;
use std::time::Duration;

/// Abstraction over a 3D map view's camera.
///
/// # Implementations
///
/// - **Production**: wraps the platform map view's camera setter and
///   its animation block
/// - **Simulation**: records every call and advances a virtual clock
///
/// # Call Flow
///
/// ```text
/// Sequencer                        Map view
///   |                                 |
///   |-- set_pose_immediate(p0) ------>|  (no transition)
///   |-- animate_pose(p1, d) --------->|
///   |                                 |-- [interpolates over d] --+
///   |<-------------- Ok(()) ----------|<--------------------------+
/// ```
#[async_trait]
pub trait CameraAnimator: Send + Sync + 'static {
    /// Jumps the camera to `pose` without any visible transition.
    fn set_pose_immediate(&self, pose: CameraPose);

    /// Animates the camera from its current pose to `pose` over `duration`.
    ///
    /// # Returns
    /// * `Ok(())` - The transition finished
    /// * `Err(EnvError::AnimationError)` - The transition was interrupted
    ///
    /// # Note
    /// The returned future must resolve exactly once per call. A future that
    /// never resolves stalls the run unless a timeout is configured.
    async fn animate_pose(&self, pose: CameraPose, duration: Duration) -> Result<(), EnvError>;
}
