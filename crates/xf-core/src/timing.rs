//! Opt-in wall clock timing.
//!
//! Timers are inert unless enabled with [`enable_timing`] or the `XF_TIMING`
//! environment variable; measurements are reported through `tracing`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("XF_TIMING").is_ok()
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

    /// Elapsed seconds, or None when timing is disabled.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }

    /// Stop the timer and emit the measurement as an info event.
    pub fn stop_and_log(self) -> Option<f64> {
        let label = self.label;
        let elapsed = self.stop();
        if let Some(secs) = elapsed {
            tracing::info!(timer = label, elapsed_s = secs, "timing");
        }
        elapsed
    }
}
