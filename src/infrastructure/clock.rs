//! Wall clock for confirmation polling

use std::time::{Duration, Instant};

use crate::domain::ports::Clock;

/// Monotonic clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
