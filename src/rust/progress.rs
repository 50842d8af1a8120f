use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Snapshot handed to the progress callback after each row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Share of rows handled so far, 0..=100.
    pub percent: f64,
    pub total_rows: usize,
    /// Configured delay before each classifier call.
    pub delay: Duration,
}

impl Progress {
    pub fn new(rows_done: usize, total_rows: usize, delay: Duration) -> Self {
        let percent = if total_rows == 0 {
            100.0
        } else {
            rows_done as f64 / total_rows as f64 * 100.0
        };
        Self { percent, total_rows, delay }
    }

    pub fn remaining_rows(&self) -> usize {
        let done = (self.percent / 100.0 * self.total_rows as f64).round() as usize;
        self.total_rows.saturating_sub(done)
    }

    /// Lower bound on the time left: one delay per remaining row.
    pub fn estimated_remaining(&self) -> Duration {
        let rows = u32::try_from(self.remaining_rows()).unwrap_or(u32::MAX);
        self.delay.saturating_mul(rows)
    }
}

/// Shared flag asking a running pass to stop at the next row boundary.
///
/// Clones share the same flag. The worker reads it once per row, so relaxed
/// ordering is enough.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Clears a previous request so the handle can drive another pass.
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }
}
