//! Session configuration
//!
//! One JSON document covers every tunable. Missing keys take their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trifit_analysis::AnalysisConfig;
use trifit_core::{TrifitError, TrifitResult};
use trifit_visual::{DebounceConfig, StabilityConfig};
use trifit_voice::VoiceConfig;

use crate::CaptureConfig;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frame loop period (33 ms is roughly 30 fps)
    pub frame_interval_ms: u64,
    pub stability: StabilityConfig,
    pub gesture: DebounceConfig,
    pub voice: VoiceConfig,
    pub capture: CaptureConfig,
    pub analysis: AnalysisConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 33,
            stability: StabilityConfig::default(),
            gesture: DebounceConfig::default(),
            voice: VoiceConfig::default(),
            capture: CaptureConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> TrifitResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TrifitError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> TrifitResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| TrifitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrifitResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(TrifitError::Config("frame_interval_ms must be positive".into()));
        }
        if self.stability.threshold == 0 {
            return Err(TrifitError::Config("stability.threshold must be positive".into()));
        }
        if !(self.gesture.increment_per_frame > 0.0 && self.gesture.target > 0.0) {
            return Err(TrifitError::Config(
                "gesture increment and target must be positive".into(),
            ));
        }
        if self.capture.tick_ms == 0 {
            return Err(TrifitError::Config("capture.tick_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.stability.threshold, 40);
        assert_eq!(config.capture.countdown_from, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = SessionConfig::from_json(
            r#"{
                "frame_interval_ms": 50,
                "stability": { "threshold": 20 },
                "voice": { "min_spacing_ms": 1500 },
                "analysis": { "endpoint": "http://fit.local/analyze" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.frame_interval_ms, 50);
        assert_eq!(config.stability.threshold, 20);
        assert_eq!(config.stability.decay_per_frame, 2);
        assert_eq!(config.voice.min_spacing_ms, 1500);
        assert_eq!(config.analysis.endpoint, "http://fit.local/analyze");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SessionConfig::from_json(r#"{ "frame_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TrifitError::Config(_)));

        let err = SessionConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, TrifitError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::load("/nonexistent/trifit.json").unwrap_err();
        assert!(matches!(err, TrifitError::Config(msg) if msg.contains("trifit.json")));
    }
}
