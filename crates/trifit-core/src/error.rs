//! Error types for TRIFIT

use thiserror::Error;

use crate::FeedbackReason;

/// Core TRIFIT errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrifitError {
    // Landmark errors
    #[error("Too few landmarks: expected at least {expected}, got {actual}")]
    TooFewLandmarks { expected: usize, actual: usize },

    #[error("Landmark {0} has non-finite coordinates")]
    NonFiniteLandmark(usize),

    #[error("Pose detection failed: {0}")]
    DetectionFailed(String),

    // Profile errors
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    // Interview errors
    #[error("Interview already finished")]
    InterviewFinished,

    #[error("Ability already recorded for {0}")]
    AbilityAlreadyRecorded(&'static str),

    #[error("Answer locked until the hands are lowered")]
    AnswerLocked,

    // Screen errors
    #[error("Action not available on the {0} screen")]
    ScreenInactive(&'static str),

    // Capture errors
    #[error("Pose not stable{}", .reason.map(|r| format!(": {}", r.as_str())).unwrap_or_default())]
    NotStable { reason: Option<FeedbackReason> },

    #[error("Capture already in progress")]
    CaptureInProgress,

    // Camera errors
    #[error("Camera error: {0}")]
    Camera(String),

    // Analysis errors
    #[error("Analysis service unavailable: {0}")]
    AnalysisUnavailable(String),

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    // Config errors
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for TRIFIT operations
pub type TrifitResult<T> = Result<T, TrifitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_stable_message() {
        let err = TrifitError::NotStable {
            reason: Some(FeedbackReason::Tilted),
        };
        assert_eq!(err.to_string(), "Pose not stable: tilted");

        let err = TrifitError::NotStable { reason: None };
        assert_eq!(err.to_string(), "Pose not stable");
    }
}
