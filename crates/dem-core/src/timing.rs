//! Lightweight stage timing.
//!
//! Disabled by default. Enable with the `DEM_TIMING` environment variable
//! or programmatically with [`enable_timing`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable stage timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os("DEM_TIMING").is_some()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }

    /// Stop the timer and emit a `timing` event if enabled.
    pub fn stop_and_log(self) -> Option<f64> {
        let label = self.label;
        let elapsed = self.stop();
        if let Some(secs) = elapsed {
            tracing::info!(target: "timing", stage = label, elapsed_s = secs, "stage finished");
        }
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_timer_reports_elapsed() {
        enable_timing();
        let timer = Timer::start("test");
        let elapsed = timer.stop_and_log();
        assert!(elapsed.is_some_and(|s| s >= 0.0));
    }
}
