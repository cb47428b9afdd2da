//! Stopwatch
//!
//! Elapsed-seconds counter driven by a tokio interval task. The task only
//! exists while the stopwatch runs; stopping or dropping it aborts the task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Starting value of the dashboard's time tracker widget
pub const DASHBOARD_START_SECS: u64 = 5048;

/// Cancellable once-per-second counter
#[derive(Debug)]
pub struct Stopwatch {
    elapsed: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl Stopwatch {
    /// A stopped stopwatch showing `initial_secs`
    pub fn new(initial_secs: u64) -> Self {
        Self {
            elapsed: Arc::new(AtomicU64::new(initial_secs)),
            ticker: None,
        }
    }

    /// The dashboard widget: 01:24:08 and already running
    pub fn dashboard() -> Self {
        let mut stopwatch = Self::new(DASHBOARD_START_SECS);
        stopwatch.start();
        stopwatch
    }

    /// Start counting. No-op when already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let elapsed = Arc::clone(&self.elapsed);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                elapsed.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    /// Stop counting, keeping the elapsed time
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Zero the counter. A running stopwatch keeps running from zero.
    pub fn reset(&mut self) {
        self.elapsed.store(0, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Whole seconds counted so far
    pub fn elapsed(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    /// `HH:MM:SS`
    pub fn display(&self) -> String {
        format_hms(self.elapsed())
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Format seconds as zero-padded `HH:MM:SS`; hours keep growing past 99
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
