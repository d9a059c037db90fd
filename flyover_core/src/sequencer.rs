//! The flyover sequencer - drives a map camera along a flight plan.
//!
//! A run is an explicit state machine ([`FlyoverRun`]) advanced by a single
//! loop, one camera animation at a time:
//!
//! ```text
//!   Idle ──(< 2 waypoints)──────────────────────────────► Completed
//!    │
//!    └─► AnimatingLeg(i) ──(w[i+2] exists)──► AnimatingReorientation(i)
//!             ▲      │                                  │
//!             │      └──(no w[i+2])──► Completed        │
//!             └──────────────── i += 1 ◄────────────────┘
//! ```
//!
//! Only the first leg places the camera instantaneously. Every later leg
//! starts from wherever the reorientation left it.

use crate::bearing::{initial_bearing, normalize_heading};
use crate::plan::{FlightPlan, FlyoverConfig};
use flyover_env::{CameraAnimator, CameraPose, EnvError, FlyoverContext, GeoPoint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by [`FlyoverSequencer::run`]
#[derive(Debug, Error)]
pub enum FlyoverError {
    #[error("A flyover is already in progress")]
    AlreadyActive,

    #[error("Camera animation failed on leg {leg}: {source}")]
    Animation {
        leg: usize,
        #[source]
        source: EnvError,
    },
}

/// Lifecycle of a single flyover run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    AnimatingLeg,
    AnimatingReorientation,
    Completed,
}

/// An animated camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub pose: CameraPose,
    pub duration: Duration,
}

/// What the driver must do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Traverse a leg. `place` is set only for the very first leg.
    Leg {
        place: Option<CameraPose>,
        transition: Transition,
    },

    /// Turn in place toward the next leg.
    Reorient(Transition),

    /// Nothing left to fly.
    Complete,
}

/// State machine for one pass over a flight plan.
///
/// Owns a copy of the waypoints and walks them with a cursor instead of
/// shrinking the list.
#[derive(Debug, Clone)]
pub struct FlyoverRun {
    waypoints: Vec<GeoPoint>,

    /// Index of the waypoint the current leg starts from
    cursor: usize,

    state: RunState,
    distance: f64,
    pitch: f64,
    leg_duration: Duration,
    reorientation: Duration,
    normalize: bool,
}

impl FlyoverRun {
    /// Prepares a run for `plan`. Nothing is issued until [`advance`](Self::advance).
    pub fn new(plan: &FlightPlan, config: &FlyoverConfig) -> Self {
        Self {
            waypoints: plan.waypoints.clone(),
            cursor: 0,
            state: RunState::Idle,
            distance: plan.altitude,
            pitch: config.pitch,
            leg_duration: config.leg_duration(plan.duration),
            reorientation: config.reorientation,
            normalize: config.normalize_heading,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Index of the current leg's starting waypoint.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves to the next state and returns the camera work it requires.
    ///
    /// Call once to begin, then once after every finished animation.
    pub fn advance(&mut self) -> Step {
        match self.state {
            RunState::Idle => {
                if self.waypoints.len() < 2 {
                    self.state = RunState::Completed;
                    return Step::Complete;
                }
                self.state = RunState::AnimatingLeg;
                self.leg_step(true)
            }
            RunState::AnimatingLeg => {
                let turn_at = self.cursor + 1;
                if turn_at + 1 < self.waypoints.len() {
                    self.state = RunState::AnimatingReorientation;
                    let heading = self.heading(turn_at, turn_at + 1);
                    Step::Reorient(Transition {
                        pose: self.pose(turn_at, heading),
                        duration: self.reorientation,
                    })
                } else {
                    self.state = RunState::Completed;
                    Step::Complete
                }
            }
            RunState::AnimatingReorientation => {
                self.cursor += 1;
                self.state = RunState::AnimatingLeg;
                self.leg_step(false)
            }
            RunState::Completed => Step::Complete,
        }
    }

    fn leg_step(&self, place_camera: bool) -> Step {
        let from = self.cursor;
        let to = from + 1;
        let heading = self.heading(from, to);

        Step::Leg {
            place: place_camera.then(|| self.pose(from, heading)),
            transition: Transition {
                pose: self.pose(to, heading),
                duration: self.leg_duration,
            },
        }
    }

    fn heading(&self, from: usize, to: usize) -> f64 {
        let raw = initial_bearing(self.waypoints[from], self.waypoints[to]);
        if self.normalize {
            normalize_heading(raw)
        } else {
            raw
        }
    }

    fn pose(&self, at: usize, heading: f64) -> CameraPose {
        CameraPose::looking_at(self.waypoints[at], self.distance, self.pitch, heading)
    }
}

/// Result of a start request on the callback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A run was spawned; the callback fires when it ends
    Started,

    /// Fewer than two waypoints; the callback already fired
    CompletedImmediately,

    /// Another run is in flight; nothing happened
    Rejected,
}

/// Statistics of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyoverSummary {
    pub legs: usize,
    pub reorientations: usize,

    /// Great-circle length of the whole path in meters
    pub distance_m: f64,

    /// Context time from first to last camera call
    pub elapsed: Duration,
}

/// Holds the sequencer's active flag for the lifetime of one run.
struct ActiveRun(Arc<AtomicBool>);

impl ActiveRun {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives a [`CameraAnimator`] through flight plans, one run at a time.
///
/// Generic over the context and animator implementations, so the same
/// sequencer runs against a live map view or the simulator.
pub struct FlyoverSequencer<Ctx, A>
where
    Ctx: FlyoverContext,
    A: CameraAnimator,
{
    context: Arc<Ctx>,
    animator: Arc<A>,
    config: Arc<FlyoverConfig>,
    active: Arc<AtomicBool>,
}

impl<Ctx, A> FlyoverSequencer<Ctx, A>
where
    Ctx: FlyoverContext,
    A: CameraAnimator,
{
    pub fn new(context: Arc<Ctx>, animator: Arc<A>, config: FlyoverConfig) -> Self {
        Self {
            context,
            animator,
            config: Arc::new(config),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &FlyoverConfig {
        &self.config
    }

    /// True while a run is in flight.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Starts a flyover in the background and calls `on_complete` when it ends.
    ///
    /// The active flag is released before `on_complete` runs, so the
    /// callback may immediately start another flyover. If the animator
    /// fails, the run stops early and `on_complete` still fires.
    pub fn start<F>(&self, plan: &FlightPlan, on_complete: F) -> StartOutcome
    where
        F: FnOnce() + Send + 'static,
    {
        let guard = match ActiveRun::claim(&self.active) {
            Some(guard) => guard,
            None => {
                debug!("Flyover already in progress, ignoring start request");
                return StartOutcome::Rejected;
            }
        };

        if !plan.is_flyable() {
            drop(guard);
            info!(
                "Flyover needs at least 2 waypoints, got {}; completing immediately",
                plan.waypoints.len()
            );
            on_complete();
            return StartOutcome::CompletedImmediately;
        }

        let run = FlyoverRun::new(plan, &self.config);
        let distance_m = plan.total_distance_m();
        let context = Arc::clone(&self.context);
        let animator = Arc::clone(&self.animator);
        let config = Arc::clone(&self.config);

        self.context.spawn("flyover", async move {
            match fly(&*context, &*animator, &config, run, distance_m).await {
                Ok(summary) => info!(
                    "Flyover complete: {} legs, {} turns, {:.1} km",
                    summary.legs,
                    summary.reorientations,
                    summary.distance_m / 1000.0
                ),
                Err(e) => warn!("Flyover aborted: {}", e),
            }
            drop(guard);
            on_complete();
        });

        StartOutcome::Started
    }

    /// Flies `plan` to completion on the calling task.
    pub async fn run(&self, plan: &FlightPlan) -> Result<FlyoverSummary, FlyoverError> {
        let _guard = ActiveRun::claim(&self.active).ok_or(FlyoverError::AlreadyActive)?;
        let run = FlyoverRun::new(plan, &self.config);
        fly(&*self.context, &*self.animator, &self.config, run, plan.total_distance_m()).await
    }
}

async fn fly<Ctx, A>(
    context: &Ctx,
    animator: &A,
    config: &FlyoverConfig,
    mut run: FlyoverRun,
    distance_m: f64,
) -> Result<FlyoverSummary, FlyoverError>
where
    Ctx: FlyoverContext,
    A: CameraAnimator,
{
    let started = context.now();
    let mut summary = FlyoverSummary {
        legs: 0,
        reorientations: 0,
        distance_m,
        elapsed: Duration::ZERO,
    };

    loop {
        match run.advance() {
            Step::Leg { place, transition } => {
                if let Some(pose) = place {
                    animator.set_pose_immediate(pose);
                }
                debug!(
                    "Leg {}: -> {} heading {:.1}° over {:.1}s",
                    run.cursor(),
                    transition.pose.center,
                    transition.pose.heading,
                    transition.duration.as_secs_f64()
                );
                animate(context, animator, config, transition)
                    .await
                    .map_err(|source| FlyoverError::Animation { leg: run.cursor(), source })?;
                summary.legs += 1;
            }
            Step::Reorient(transition) => {
                debug!(
                    "Turning at {} to heading {:.1}°",
                    transition.pose.center, transition.pose.heading
                );
                animate(context, animator, config, transition)
                    .await
                    .map_err(|source| FlyoverError::Animation { leg: run.cursor(), source })?;
                summary.reorientations += 1;
            }
            Step::Complete => break,
        }
    }

    summary.elapsed = context.now().saturating_sub(started);
    Ok(summary)
}

async fn animate<Ctx, A>(
    context: &Ctx,
    animator: &A,
    config: &FlyoverConfig,
    transition: Transition,
) -> Result<(), EnvError>
where
    Ctx: FlyoverContext,
    A: CameraAnimator,
{
    match config.animation_timeout {
        None => animator.animate_pose(transition.pose, transition.duration).await,
        Some(grace) => {
            let limit = transition.duration.saturating_add(grace);
            tokio::select! {
                biased;
                result = animator.animate_pose(transition.pose, transition.duration) => result,
                _ = context.sleep(limit) => Err(EnvError::Timeout(limit.as_millis() as u64)),
            }
        }
    }
}
