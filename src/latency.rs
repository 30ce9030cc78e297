//! Simulated latency for tutor replies and code runs
//!
//! A delayed computation is spawned as a tokio task behind a `Pending<T>`
//! handle. Dropping the handle aborts the task, so a reply or run result can
//! never land after the view that started it has gone away.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SimulationConfig;

/// Source of delays
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock delays
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Skips every delay; used by tests and the one-shot CLI commands
pub struct Immediate;

#[async_trait]
impl Scheduler for Immediate {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Delay settings shared by the tutor chat and the lesson viewer
#[derive(Clone)]
pub struct Latency {
    scheduler: Arc<dyn Scheduler>,
    pub reply_delay: Duration,
    pub run_delay: Duration,
}

impl Latency {
    pub fn new(scheduler: Arc<dyn Scheduler>, reply_delay: Duration, run_delay: Duration) -> Self {
        Self { scheduler, reply_delay, run_delay }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            Arc::new(TokioScheduler),
            Duration::from_millis(config.tutor_reply_delay_ms),
            Duration::from_millis(config.code_run_delay_ms),
        )
    }

    /// Zero-delay latency for tests
    pub fn immediate() -> Self {
        Self::new(Arc::new(Immediate), Duration::ZERO, Duration::ZERO)
    }

    /// Run `work` after `delay` on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime.
    pub fn defer<T, F>(&self, delay: Duration, work: F) -> Option<Pending<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("Cannot schedule delayed work: {}", e);
                return None;
            }
        };
        let scheduler = self.scheduler.clone();
        let handle = runtime.spawn(async move {
            scheduler.sleep(delay).await;
            work()
        });
        Some(Pending { handle: Some(handle) })
    }
}

impl std::fmt::Debug for Latency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Latency")
            .field("reply_delay", &self.reply_delay)
            .field("run_delay", &self.run_delay)
            .finish()
    }
}

/// Handle to a delayed computation, aborted on drop
pub struct Pending<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T> Pending<T> {
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Abort the computation; a later `wait` yields `None`
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Cancelled pending task");
        }
    }

    /// Wait for the result. `None` when the task was cancelled or panicked.
    pub async fn wait(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        match handle.await {
            Ok(value) => Some(value),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!("Pending task failed: {}", e);
                None
            }
        }
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
