use std::time::{Duration, Instant};
use tracing::debug;

/// A simple wall-clock timer for logging elapsed time.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("Finished: {} (took {:.2?})", self.label, self.elapsed());
    }
}

/// Format a price with at least one decimal place.
/// 99.0 → "99.0" | 16.5 → "16.5" | 0.1 + 0.2 → "0.30000000000000004"
pub fn fmt_price(p: f64) -> String {
    format!("{:?}", p)
}
