//! Scripted analyzer

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use trifit_analysis::{AnalysisCollaborator, OfflineEstimator};
use trifit_core::{AnalysisResult, CapturedImage, TrifitResult, UserProfile};

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<TrifitResult<AnalysisResult>>,
    calls: Vec<UserProfile>,
}

/// Returns queued replies in order; once empty, a seeded offline estimate.
/// Clones share the script.
#[derive(Debug, Clone)]
pub struct ScriptedAnalyzer {
    script: Arc<Mutex<Script>>,
    estimator: Arc<OfflineEstimator>,
}

impl ScriptedAnalyzer {
    pub fn new() -> Self {
        Self {
            script: Arc::default(),
            estimator: Arc::new(OfflineEstimator::seeded(0)),
        }
    }

    /// Queue a reply
    pub fn reply(self, reply: TrifitResult<AnalysisResult>) -> Self {
        self.script.lock().replies.push_back(reply);
        self
    }

    /// Queue a pose rejection
    pub fn reject(self, message: Option<&str>) -> Self {
        let mut result = self.estimator.estimate(&UserProfile::default());
        result.is_valid_pose = false;
        result.validation_message = message.map(str::to_string);
        self.reply(Ok(result))
    }

    /// Profiles submitted so far
    pub fn calls(&self) -> Vec<UserProfile> {
        self.script.lock().calls.clone()
    }
}

impl Default for ScriptedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisCollaborator for ScriptedAnalyzer {
    fn analyze(
        &self,
        _image: &CapturedImage,
        profile: &UserProfile,
    ) -> impl Future<Output = TrifitResult<AnalysisResult>> + Send {
        let reply = {
            let mut script = self.script.lock();
            script.calls.push(profile.clone());
            script.replies.pop_front()
        };
        let reply = reply.unwrap_or_else(|| Ok(self.estimator.estimate(profile)));
        async move { reply }
    }
}
