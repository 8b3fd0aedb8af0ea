//! Session clocks
//!
//! Everything time-based in a session (voice spacing, countdown ticks) reads
//! a [`Clock`] instead of the OS clock so it can be driven by hand in tests.
//! Time is a monotonic offset from the session epoch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Monotonic session clock
pub trait Clock: Send + Sync {
    /// Time elapsed since the session epoch.
    /// INVARIANT: never decreases between calls
    fn now(&self) -> Duration;
}

/// Clock backed by the OS monotonic clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    value: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, dt: Duration) {
        let mut value = self.value.lock();
        *value = value.saturating_add(dt);
    }

    /// Jump to an absolute time; ignored if it would move backwards
    pub fn set(&self, at: Duration) {
        let mut value = self.value.lock();
        if at > *value {
            *value = at;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.value.lock()
    }
}
