//! Capture orchestrator - stability-gated countdown
//!
//! The countdown is a deadline polled from the frame loop, so canceling it
//! is synchronous: once [`CaptureOrchestrator::cancel`] returns, no tick or
//! fire can be produced by a stale countdown.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trifit_core::{TrifitError, TrifitResult};
use trifit_visual::StabilityState;

/// Countdown configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// First number announced
    pub countdown_from: u32,
    /// Time between announcements
    pub tick_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            tick_ms: 1_000,
        }
    }
}

impl CaptureConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Countdown progress reported by [`CaptureOrchestrator::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Announce this number
    Tick(u32),
    /// Take the picture now
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Idle,
    Counting { remaining: u32, next_at: Duration },
}

/// Capture orchestrator
#[derive(Debug, Clone)]
pub struct CaptureOrchestrator {
    config: CaptureConfig,
    state: CountdownState,
}

impl CaptureOrchestrator {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            state: CountdownState::Idle,
        }
    }

    /// Start the countdown if the pose is stable.
    ///
    /// Returns the first number to announce.
    pub fn request_capture(&mut self, stability: &StabilityState, now: Duration) -> TrifitResult<u32> {
        if self.is_counting() {
            return Err(TrifitError::CaptureInProgress);
        }
        if !stability.is_stable {
            debug!("Capture refused at {}%", stability.percentage);
            return Err(TrifitError::NotStable {
                reason: stability.feedback_reason,
            });
        }

        let first = self.config.countdown_from.max(1);
        info!("Countdown started from {}", first);
        self.state = CountdownState::Counting {
            remaining: first,
            next_at: now + self.config.tick(),
        };
        Ok(first)
    }

    /// Advance the countdown. At most one event per call.
    pub fn poll(&mut self, now: Duration) -> Option<CountdownEvent> {
        let CountdownState::Counting { remaining, next_at } = self.state else {
            return None;
        };
        if now < next_at {
            return None;
        }

        let remaining = remaining - 1;
        if remaining == 0 {
            info!("Countdown fired");
            self.state = CountdownState::Idle;
            return Some(CountdownEvent::Fire);
        }

        self.state = CountdownState::Counting {
            remaining,
            next_at: next_at + self.config.tick(),
        };
        Some(CountdownEvent::Tick(remaining))
    }

    /// Abort a running countdown. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_counting = self.is_counting();
        if was_counting {
            info!("Countdown canceled");
        }
        self.state = CountdownState::Idle;
        was_counting
    }

    pub fn is_counting(&self) -> bool {
        matches!(self.state, CountdownState::Counting { .. })
    }

    /// Number currently shown, if counting
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            CountdownState::Counting { remaining, .. } => Some(remaining),
            CountdownState::Idle => None,
        }
    }
}

impl Default for CaptureOrchestrator {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
