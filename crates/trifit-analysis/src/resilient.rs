//! Resilient Analyzer - primary collaborator with offline fallback

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};
use trifit_core::{AnalysisResult, CapturedImage, TrifitResult, UserProfile};

use crate::{AnalysisCollaborator, AnalysisConfig, OfflineEstimator, RemoteAnalyzer};

/// Wraps a primary collaborator. Any primary failure is logged and replaced
/// by an offline estimate, so `analyze` never returns an error.
#[derive(Debug)]
pub struct ResilientAnalyzer<P> {
    primary: P,
    fallback: OfflineEstimator,
    offline_delay: Duration,
}

impl<P: AnalysisCollaborator> ResilientAnalyzer<P> {
    pub fn new(primary: P, fallback: OfflineEstimator) -> Self {
        Self {
            primary,
            fallback,
            offline_delay: Duration::ZERO,
        }
    }

    /// Pause before returning a fallback estimate
    pub fn with_offline_delay(mut self, delay: Duration) -> Self {
        self.offline_delay = delay;
        self
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Analyze, never failing
    pub async fn analyze_or_estimate(
        &self,
        image: &CapturedImage,
        profile: &UserProfile,
    ) -> AnalysisResult {
        match self.primary.analyze(image, profile).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Analysis failed, switching to offline estimate: {}", e);
                if !self.offline_delay.is_zero() {
                    tokio::time::sleep(self.offline_delay).await;
                }
                self.fallback.estimate(profile)
            }
        }
    }
}

impl ResilientAnalyzer<RemoteAnalyzer> {
    /// Remote service with offline fallback, from configuration
    pub fn from_config(config: &AnalysisConfig) -> TrifitResult<Self> {
        let remote = RemoteAnalyzer::new(config)?;
        if !remote.has_api_key() {
            info!("No analysis API key configured, captures will use the offline estimate");
        }

        Ok(Self::new(remote, OfflineEstimator::from_seed(config.seed))
            .with_offline_delay(config.offline_delay()))
    }
}

impl<P: AnalysisCollaborator> AnalysisCollaborator for ResilientAnalyzer<P> {
    fn analyze(
        &self,
        image: &CapturedImage,
        profile: &UserProfile,
    ) -> impl Future<Output = TrifitResult<AnalysisResult>> + Send {
        async move { Ok(self.analyze_or_estimate(image, profile).await) }
    }
}
