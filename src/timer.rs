//! Frame timing.

use instant::Instant;

/// Cumulative-time source consumed by the scene's update tick.
///
/// Production code uses [`StepTimer`]; tests can supply fixed values.
pub trait FrameTimer {
    /// Seconds elapsed since the timer started.
    fn total_seconds(&self) -> f64;
}

/// Wall-clock timer backed by `instant`, monotonic on native and WASM.
#[derive(Debug, Clone)]
pub struct StepTimer {
    start: Instant,
}

impl StepTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restart the cumulative count from zero.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer for StepTimer {
    fn total_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameTimer, StepTimer};

    #[test]
    fn step_timer_counts_forward() {
        let timer = StepTimer::new();
        let first = timer.total_seconds();
        let second = timer.total_seconds();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
