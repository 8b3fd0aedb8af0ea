//! Analysis collaborator seam and its configuration

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trifit_core::{AnalysisResult, CapturedImage, TrifitResult, UserProfile};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "TRIFIT_API_KEY";

/// Maps a captured still and the athlete profile to a fitting recommendation
pub trait AnalysisCollaborator: Send + Sync {
    fn analyze(
        &self,
        image: &CapturedImage,
        profile: &UserProfile,
    ) -> impl Future<Output = TrifitResult<AnalysisResult>> + Send;
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Vision service endpoint
    pub endpoint: String,
    /// Bearer key for the service; read from `TRIFIT_API_KEY` when unset
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout_ms: u64,
    /// Pause before returning an offline estimate, so the analyzing screen
    /// does not flash by
    pub offline_delay_ms: u64,
    /// Seed for the offline estimator; random when unset
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1/analyze".to_string(),
            api_key: None,
            timeout_ms: 20_000,
            offline_delay_ms: 2_000,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn offline_delay(&self) -> Duration {
        Duration::from_millis(self.offline_delay_ms)
    }

    /// Configured key, else the environment, ignoring blank values
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
