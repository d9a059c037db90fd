//! Simulation context implementing FlyoverContext with a virtual clock.

use async_trait::async_trait;
use flyover_env::FlyoverContext;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Instrument;

/// Simulation context backed by deterministic time.
///
/// Time never moves on its own: sleeping and recorded animations
/// advance the virtual clock instantly, so a two-minute flyover
/// replays in microseconds.
pub struct SimContext {
    /// Current virtual time since simulation start
    virtual_time: Arc<Mutex<Duration>>,
}

impl SimContext {
    /// Creates a new SimContext at virtual time zero.
    pub fn new() -> Self {
        Self {
            virtual_time: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Creates an Arc-wrapped context for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Advances virtual time by the given duration, saturating at
    /// [`Duration::MAX`].
    pub fn advance_time(&self, duration: Duration) {
        let mut time = self.virtual_time.lock().unwrap();
        *time = time.saturating_add(duration);
    }

    /// Returns the current virtual time.
    pub fn elapsed(&self) -> Duration {
        *self.virtual_time.lock().unwrap()
    }

    /// Returns the current virtual time in seconds.
    pub fn now_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SimContext {
    fn clone(&self) -> Self {
        Self {
            virtual_time: Arc::clone(&self.virtual_time),
        }
    }
}

#[async_trait]
impl FlyoverContext for SimContext {
    fn now(&self) -> Duration {
        self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        // In simulation, sleep advances virtual time
        self.advance_time(duration);
    }

    fn spawn<F>(&self, name: &str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future.instrument(tracing::debug_span!("sim_task", task = name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_context_time() {
        let ctx = SimContext::new();
        assert_eq!(ctx.now(), Duration::ZERO);

        ctx.advance_time(Duration::from_secs(1));
        assert_eq!(ctx.now(), Duration::from_secs(1));

        ctx.advance_time(Duration::from_millis(500));
        assert_eq!(ctx.now(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_sim_sleep_is_instant() {
        let ctx = SimContext::new();
        ctx.sleep(Duration::from_secs(3600)).await;
        assert_eq!(ctx.now(), Duration::from_secs(3600));
    }

    #[test]
    fn test_sim_context_keeps_centuries_of_time() {
        let ctx = SimContext::new();
        let legs = Duration::from_secs(75_000_000_000);

        ctx.advance_time(legs);
        ctx.advance_time(Duration::from_secs(5));
        assert_eq!(ctx.now(), legs + Duration::from_secs(5));
        assert_eq!(ctx.now_secs(), 75_000_000_005.0);

        ctx.advance_time(Duration::MAX);
        assert_eq!(ctx.now(), Duration::MAX);
    }

    #[tokio::test]
    async fn test_sim_spawn_runs_future() {
        let ctx = SimContext::new();
        let (tx, rx) = tokio::sync::oneshot::channel();

        ctx.spawn("flyover", async move {
            let _ = tx.send(());
        });

        assert!(rx.await.is_ok());
    }

    #[test]
    fn test_sim_context_clone_shares_time() {
        let ctx1 = SimContext::new();
        let ctx2 = ctx1.clone();

        ctx1.advance_time(Duration::from_secs(5));

        // Both should see the same time
        assert_eq!(ctx1.now(), ctx2.now());
    }
}
