//! Elapsed-time indicator for an in-flight search

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Tick granularity
pub const TICK: Duration = Duration::from_millis(100);

/// Cancellable repeating tick counting tenths of a second.
///
/// At most one tick task is alive per timer. Starting again replaces the
/// running task, and dropping the timer aborts it.
#[derive(Debug, Default)]
pub struct SearchTimer {
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl SearchTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the counter and start ticking. Must be called within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        // Fresh counter so a task that is still unwinding cannot touch it
        self.ticks = Arc::new(AtomicU64::new(0));

        let ticks = Arc::clone(&self.ticks);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                ticks.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    /// Stop ticking, keeping the current value
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Stop ticking and zero the counter
    pub fn reset(&mut self) {
        self.stop();
        self.ticks = Arc::new(AtomicU64::new(0));
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Elapsed seconds at 0.1 s resolution
    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks() as f64 / 10.0
    }

    /// Elapsed seconds with one decimal, e.g. `"2.3"`
    pub fn formatted(&self) -> String {
        format!("{:.1}", self.elapsed_seconds())
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
