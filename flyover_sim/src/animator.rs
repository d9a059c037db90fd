//! Recording camera animator with fault injection.

use crate::context::SimContext;
use async_trait::async_trait;
use flyover_env::{CameraAnimator, CameraPose, EnvError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Kind of camera call observed by the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraEventKind {
    Place,
    Animate,
}

/// One camera call, stamped with virtual time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraEvent {
    /// Virtual time when the call was issued
    pub at_secs: f64,

    pub kind: CameraEventKind,

    pub pose: CameraPose,

    /// Zero for placements
    pub duration_secs: f64,
}

/// Camera animator that records every call and finishes animations
/// instantly by advancing the shared virtual clock.
pub struct RecordingAnimator {
    context: Arc<SimContext>,

    events: Mutex<Vec<CameraEvent>>,

    /// Index of the animation that should fail, if any
    fail_on: Mutex<Option<usize>>,

    animations: Mutex<usize>,
}

impl RecordingAnimator {
    pub fn new(context: Arc<SimContext>) -> Self {
        Self {
            context,
            events: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
            animations: Mutex::new(0),
        }
    }

    /// Makes the `index`-th animation (zero-based) report an interruption.
    pub fn fail_animation(&self, index: usize) {
        *self.fail_on.lock().unwrap() = Some(index);
    }

    /// Returns a copy of everything recorded so far.
    pub fn events(&self) -> Vec<CameraEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, kind: CameraEventKind, pose: CameraPose, duration: Duration) {
        self.events.lock().unwrap().push(CameraEvent {
            at_secs: self.context.now_secs(),
            kind,
            pose,
            duration_secs: duration.as_secs_f64(),
        });
    }
}

#[async_trait]
impl CameraAnimator for RecordingAnimator {
    fn set_pose_immediate(&self, pose: CameraPose) {
        self.record(CameraEventKind::Place, pose, Duration::ZERO);
    }

    async fn animate_pose(&self, pose: CameraPose, duration: Duration) -> Result<(), EnvError> {
        self.record(CameraEventKind::Animate, pose, duration);

        let index = {
            let mut count = self.animations.lock().unwrap();
            let index = *count;
            *count += 1;
            index
        };

        if *self.fail_on.lock().unwrap() == Some(index) {
            return Err(EnvError::animation(format!("animation {} interrupted", index)));
        }

        self.context.advance_time(duration);
        Ok(())
    }
}
