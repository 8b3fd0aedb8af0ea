//! Remote Analyzer - client for the vision analysis service
//!
//! Request: multipart POST with an `image` part (JPEG) and a `profile` part
//! (JSON, camelCase). Response: an `AnalysisResult` as JSON.

use std::future::Future;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use trifit_core::{AnalysisResult, CapturedImage, TrifitError, TrifitResult, UserProfile};

use crate::{AnalysisCollaborator, AnalysisConfig};

/// HTTP client for the vision service
#[derive(Debug, Clone)]
pub struct RemoteAnalyzer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteAnalyzer {
    /// Build a client from configuration
    pub fn new(config: &AnalysisConfig) -> TrifitResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TrifitError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    /// Whether a key is available; without one every call fails fast
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(image: &CapturedImage, profile: &UserProfile) -> TrifitResult<Form> {
        let profile_json = serde_json::to_string(profile)
            .map_err(|e| TrifitError::InvalidProfile(e.to_string()))?;
        let image_part = Part::bytes(image.jpeg.clone())
            .file_name("capture.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| TrifitError::AnalysisUnavailable(e.to_string()))?;

        Ok(Form::new()
            .part("image", image_part)
            .text("profile", profile_json))
    }
}

impl AnalysisCollaborator for RemoteAnalyzer {
    fn analyze(
        &self,
        image: &CapturedImage,
        profile: &UserProfile,
    ) -> impl Future<Output = TrifitResult<AnalysisResult>> + Send {
        async move {
            let key = self
                .api_key
                .as_deref()
                .ok_or_else(|| TrifitError::AnalysisUnavailable("no API key configured".into()))?;

            let form = Self::form(image, profile)?;
            debug!(
                "Submitting {} byte capture to {}",
                image.jpeg.len(),
                self.endpoint
            );

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(key)
                .multipart(form)
                .send()
                .await
                .map_err(|e| TrifitError::AnalysisUnavailable(e.to_string()))?
                .error_for_status()
                .map_err(|e| TrifitError::AnalysisUnavailable(e.to_string()))?;

            response
                .json::<AnalysisResult>()
                .await
                .map_err(|e| TrifitError::MalformedResponse(e.to_string()))
        }
    }
}
