//! Step timing.

use std::time::Instant;

/// A simple timer for measuring how long a mode took.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Human-readable elapsed time, e.g. `[2.5s] makeiso`.
    pub fn summary(&self) -> String {
        let secs = self.start.elapsed().as_secs_f64();
        if secs >= 60.0 {
            format!("[{:.1}m] {}", secs / 60.0, self.name)
        } else {
            format!("[{:.1}s] {}", secs, self.name)
        }
    }

    /// Finish the timer and print the elapsed time.
    pub fn finish(self) {
        println!("  {}", self.summary());
    }
}
