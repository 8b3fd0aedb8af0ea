//! Framing feedback - why a pose is not yet good enough to photograph

use serde::{Deserialize, Serialize};

/// Reason a frame fails the framing checks.
///
/// Variants are declared in evaluation priority: when several problems are
/// present at once, the earliest one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackReason {
    /// No skeleton in the frame
    PersonNotFound,
    /// A shoulder is too close to the frame edge
    FrameCutoff,
    /// Shoulder midpoint too far from the frame center
    OffCenter,
    /// Shoulders span too much of the frame
    TooClose,
    /// Shoulders span too little of the frame
    TooFar,
    /// Shoulders not level
    Tilted,
}

impl FeedbackReason {
    /// Stable identifier for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonNotFound => "person_not_found",
            Self::FrameCutoff => "frame_cutoff",
            Self::OffCenter => "off_center",
            Self::TooClose => "too_close",
            Self::TooFar => "too_far",
            Self::Tilted => "tilted",
        }
    }

    /// Whether the problem is severe (the overlay shows it in red rather than amber)
    pub fn is_severe(&self) -> bool {
        matches!(self, Self::FrameCutoff | Self::OffCenter | Self::TooClose)
    }
}
