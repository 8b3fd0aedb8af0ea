//! Captured stills and the structured result of analysing them

use serde::{Deserialize, Serialize};

/// Default message when an analysis rejects the pose without saying why
pub const DEFAULT_INVALID_POSE_MESSAGE: &str = "Please step back a little, I can't see your shoulders";

/// A single still taken from the camera, JPEG encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            jpeg,
            width,
            height,
        }
    }
}

/// Fitting recommendation for one capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_valid_pose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    pub size_recommendation: String,
    pub is_broad_shoulders: bool,
    pub body_type_analysis: String,
    pub strategy_suit: String,
    pub strategy_nutrition: String,
    pub strategy_tip: String,
    pub encouragement: String,
}

impl AnalysisResult {
    /// Message to surface when the pose was rejected
    pub fn rejection_message(&self) -> &str {
        self.validation_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_INVALID_POSE_MESSAGE)
    }
}
