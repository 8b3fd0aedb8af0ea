//! Gesture Debouncer - one answer per gesture episode
//!
//! A raised hand has to be held for a while before it counts, and once it
//! has counted it cannot count again until the hand comes down. Without the
//! lock the same raised hand would answer the next question the moment it
//! appears.
//!
//! ```text
//!            raised                 same class, progress >= target
//!   Idle ──────────────► Accumulating ───────────────────────────► Locked
//!    ▲                        │                                      │
//!    └──────── none ──────────┘◄─────────────── none ────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Gesture;

/// Debounce configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Progress added per frame while the same gesture is held
    pub increment_per_frame: f32,
    /// Progress needed to confirm an answer
    pub target: f32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        // 100 frames, about 3.3 s at 30 fps
        Self {
            increment_per_frame: 1.0,
            target: 100.0,
        }
    }
}

/// Debouncer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    /// Waiting for a raised hand
    Idle,
    /// Holding a raised hand of this class
    Accumulating(Gesture),
    /// Answer given (or question changed); waiting for the hands to come down
    Locked,
}

/// Turns per-frame gestures into confirmed answers
#[derive(Debug)]
pub struct GestureDebouncer {
    config: DebounceConfig,
    phase: DebouncePhase,
    progress: f32,
}

impl GestureDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            phase: DebouncePhase::Idle,
            progress: 0.0,
        }
    }

    /// Feed one frame's gesture. Returns the confirmed answer, at most once
    /// per episode: `LeftRaised` answers yes, `RightRaised` answers no.
    pub fn update(&mut self, gesture: Gesture) -> Option<bool> {
        match (self.phase, gesture) {
            (DebouncePhase::Locked, Gesture::None) => {
                debug!("Gesture lock released");
                self.phase = DebouncePhase::Idle;
                self.progress = 0.0;
                None
            }
            (DebouncePhase::Locked, _) => {
                self.progress = 0.0;
                None
            }
            (_, Gesture::None) => {
                self.phase = DebouncePhase::Idle;
                self.progress = 0.0;
                None
            }
            (DebouncePhase::Accumulating(held), g) if held == g => self.accumulate(g),
            (_, g) => {
                // New episode: fresh start, no credit from a different class
                self.phase = DebouncePhase::Accumulating(g);
                self.progress = 0.0;
                self.accumulate(g)
            }
        }
    }

    fn accumulate(&mut self, gesture: Gesture) -> Option<bool> {
        self.progress += self.config.increment_per_frame;
        if self.progress < self.config.target {
            return None;
        }

        debug!("Gesture confirmed: {}", gesture.as_str());
        self.phase = DebouncePhase::Locked;
        self.progress = 0.0;
        gesture.answer()
    }

    /// Force the lock (question changed). The next answer needs the hands
    /// to come down first.
    pub fn lock(&mut self) {
        self.phase = DebouncePhase::Locked;
        self.progress = 0.0;
    }

    /// Back to idle with no lock (interview restarted)
    pub fn reset(&mut self) {
        self.phase = DebouncePhase::Idle;
        self.progress = 0.0;
    }

    pub fn phase(&self) -> DebouncePhase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase == DebouncePhase::Locked
    }

    /// Hold progress in [0, 100] for display
    pub fn progress(&self) -> f32 {
        if self.config.target <= 0.0 {
            return 0.0;
        }
        (self.progress / self.config.target * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
