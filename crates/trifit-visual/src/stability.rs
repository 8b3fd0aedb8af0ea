//! Stability Tracker - framing checks with hysteresis
//!
//! Each frame the shoulders are checked against the framing rules, worst
//! problem first. Good frames build a counter slowly, bad frames drain it
//! twice as fast, and the pose only counts as stable once the counter is
//! full. At 30 fps that is about 1.3 s of continuous good framing.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trifit_core::{FeedbackReason, Skeleton};

/// Framing thresholds and hysteresis rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Counter value at which the pose is stable
    pub threshold: u32,
    /// Counter increase per good frame
    pub gain_per_frame: u32,
    /// Counter decrease per bad frame
    pub decay_per_frame: u32,
    /// Shoulders must stay within [edge_margin, 1 - edge_margin] horizontally
    pub edge_margin: f32,
    /// Maximum distance of the shoulder midpoint from the frame center
    pub max_center_offset: f32,
    /// Shoulder width above this is too close
    pub max_shoulder_width: f32,
    /// Shoulder width below this is too far
    pub min_shoulder_width: f32,
    /// Maximum vertical shoulder difference
    pub max_tilt: f32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            threshold: 40,
            gain_per_frame: 1,
            decay_per_frame: 2,
            edge_margin: 0.1,
            max_center_offset: 0.15,
            max_shoulder_width: 0.70,
            min_shoulder_width: 0.25,
            max_tilt: 0.05,
        }
    }
}

/// Snapshot of the tracker after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityState {
    /// Hysteresis counter, always within [0, threshold]
    pub counter: u32,
    /// Worst framing problem in the last frame, if any
    pub feedback_reason: Option<FeedbackReason>,
    /// INVARIANT: true iff counter == threshold
    pub is_stable: bool,
    /// round(counter / threshold * 100)
    pub percentage: u8,
}

impl StabilityState {
    fn zero() -> Self {
        Self {
            counter: 0,
            feedback_reason: None,
            is_stable: false,
            percentage: 0,
        }
    }
}

/// Result of one tracker update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityUpdate {
    pub state: StabilityState,
    /// Problem worth telling the athlete about. Requested on every bad frame
    /// that leaves the counter empty; the voice rate limit collapses repeats.
    pub announcement: Option<FeedbackReason>,
}

/// Classify the shoulders of one frame, worst problem first
pub fn classify_framing(skeleton: &Skeleton, config: &StabilityConfig) -> Option<FeedbackReason> {
    let (left, right) = skeleton.shoulders();

    let lo = config.edge_margin;
    let hi = 1.0 - config.edge_margin;
    let outside = |x: f32| x < lo || x > hi;

    let width = (left.x - right.x).abs();
    let center = (left.x + right.x) / 2.0;
    let tilt = (left.y - right.y).abs();

    if outside(left.x) || outside(right.x) {
        Some(FeedbackReason::FrameCutoff)
    } else if (center - 0.5).abs() > config.max_center_offset {
        Some(FeedbackReason::OffCenter)
    } else if width > config.max_shoulder_width {
        Some(FeedbackReason::TooClose)
    } else if width < config.min_shoulder_width {
        Some(FeedbackReason::TooFar)
    } else if tilt > config.max_tilt {
        Some(FeedbackReason::Tilted)
    } else {
        None
    }
}

/// Framing stability tracker. One instance per camera screen activation.
#[derive(Debug)]
pub struct StabilityTracker {
    config: StabilityConfig,
    state: StabilityState,
}

impl StabilityTracker {
    pub fn new(config: StabilityConfig) -> Self {
        Self {
            config,
            state: StabilityState::zero(),
        }
    }

    /// Process one frame
    pub fn update(&mut self, skeleton: Option<&Skeleton>) -> StabilityUpdate {
        let Some(skeleton) = skeleton else {
            self.state = StabilityState {
                feedback_reason: Some(FeedbackReason::PersonNotFound),
                ..StabilityState::zero()
            };
            return StabilityUpdate {
                state: self.state,
                announcement: None,
            };
        };

        let threshold = self.config.threshold;
        let reason = classify_framing(skeleton, &self.config);
        let counter = match reason {
            None => (self.state.counter + self.config.gain_per_frame).min(threshold),
            Some(_) => self.state.counter.saturating_sub(self.config.decay_per_frame),
        };

        let was_stable = self.state.is_stable;
        self.state = StabilityState {
            counter,
            feedback_reason: reason,
            is_stable: counter == threshold,
            percentage: percentage(counter, threshold),
        };

        if was_stable != self.state.is_stable {
            debug!(
                "Stability {} (counter {}/{}, reason {:?})",
                if self.state.is_stable { "reached" } else { "lost" },
                counter,
                threshold,
                reason
            );
        }

        let announcement = match reason {
            Some(r) if counter == 0 => Some(r),
            _ => None,
        };

        StabilityUpdate {
            state: self.state,
            announcement,
        }
    }

    /// Current state without advancing
    pub fn state(&self) -> StabilityState {
        self.state
    }

    /// Zero the counter (camera screen entered)
    pub fn reset(&mut self) {
        self.state = StabilityState::zero();
    }

    pub fn config(&self) -> &StabilityConfig {
        &self.config
    }
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::new(StabilityConfig::default())
    }
}

fn percentage(counter: u32, threshold: u32) -> u8 {
    if threshold == 0 {
        return 100;
    }
    let pct = (counter as f32 / threshold as f32 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
