//! Countdown timer with a fixed tick interval
//!
//! Handlers are routed through shared cells that are dereferenced at fire
//! time, so the timer always invokes the latest handler rather than one
//! captured when the countdown was started.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tracing::debug;

/// Called once per activation when the countdown reaches zero
pub type TimeoutHandler = Box<dyn Fn() + Send + Sync + 'static>;
/// Called on every tick with the remaining time in ms
pub type TickHandler = Box<dyn Fn(u64) + Send + Sync + 'static>;

#[derive(Debug, Default)]
struct TimerInner {
    duration_ms: u64,
    remaining_ms: u64,
    active: bool,
    /// Bumped on every `start`. A ticker task that observes a newer
    /// activation exits without firing.
    activation: u64,
}

/// Owns elapsed/remaining time for the active round
#[derive(Clone)]
pub struct CountdownTimer {
    inner: Arc<RwLock<TimerInner>>,
    on_timeout: Arc<RwLock<Option<TimeoutHandler>>>,
    on_tick: Arc<RwLock<Option<TickHandler>>>,
    tick_interval: Duration,
}

impl CountdownTimer {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TimerInner::default())),
            on_timeout: Arc::new(RwLock::new(None)),
            on_tick: Arc::new(RwLock::new(None)),
            tick_interval: Duration::from_millis(tick_interval_ms.max(1)),
        }
    }

    /// Replace the timeout handler. Takes effect for ticks already in flight.
    pub async fn set_on_timeout(&self, handler: TimeoutHandler) {
        *self.on_timeout.write().await = Some(handler);
    }

    /// Replace the tick handler
    pub async fn set_on_tick(&self, handler: TickHandler) {
        *self.on_tick.write().await = Some(handler);
    }

    /// Remaining time in ms, floored at 0
    pub async fn remaining_ms(&self) -> u64 {
        self.inner.read().await.remaining_ms
    }

    /// Configured duration in ms
    pub async fn duration_ms(&self) -> u64 {
        self.inner.read().await.duration_ms
    }

    pub async fn is_active(&self) -> bool {
        self.inner.read().await.active
    }

    /// Activate the countdown at the given duration.
    ///
    /// Supersedes any previous activation: the old ticker task sees the
    /// bumped activation counter and exits without firing.
    pub async fn start(&self, duration_ms: u64) {
        let activation = {
            let mut inner = self.inner.write().await;
            inner.duration_ms = duration_ms;
            inner.remaining_ms = duration_ms;
            inner.active = true;
            inner.activation += 1;
            inner.activation
        };
        debug!("Timer started: {} ms (activation {})", duration_ms, activation);
        self.spawn_ticker(activation);
    }

    /// Set remaining time back to the configured duration without firing.
    /// Idempotent; does not reactivate a fired timer.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.remaining_ms = inner.duration_ms;
    }

    /// Deactivate without firing. The ticker task exits on its next tick.
    pub async fn stop(&self) {
        self.inner.write().await.active = false;
    }

    /// Re-base the countdown to a new duration.
    ///
    /// Remaining time becomes the full new duration; the elapsed fraction is
    /// deliberately not preserved.
    pub async fn set_duration(&self, duration_ms: u64) {
        let mut inner = self.inner.write().await;
        inner.duration_ms = duration_ms;
        inner.remaining_ms = duration_ms;
    }

    fn spawn_ticker(&self, activation: u64) {
        let inner = self.inner.clone();
        let on_timeout = self.on_timeout.clone();
        let on_tick = self.on_tick.clone();
        let step = self.tick_interval.as_millis() as u64;
        let tick_interval = self.tick_interval;

        tokio::spawn(async move {
            let mut ticker = interval(tick_interval);
            // The first tick of a tokio interval completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let remaining = {
                    let mut guard = inner.write().await;
                    if !guard.active || guard.activation != activation {
                        break;
                    }
                    guard.remaining_ms = guard.remaining_ms.saturating_sub(step);
                    if guard.remaining_ms == 0 {
                        guard.active = false;
                    }
                    guard.remaining_ms
                };

                if let Some(tick) = on_tick.read().await.as_ref() {
                    tick(remaining);
                }

                if remaining == 0 {
                    if let Some(timeout) = on_timeout.read().await.as_ref() {
                        timeout();
                    }
                    break;
                }
            }
        });
    }
}
