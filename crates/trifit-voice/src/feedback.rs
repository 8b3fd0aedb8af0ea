//! Voice Feedback - rate-limited speech

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trifit_core::Clock;

use crate::{SpeechSink, Utterance};

/// Voice configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Minimum spacing between non-forced utterances
    pub min_spacing_ms: u64,
    /// Speaking rate multiplier
    pub rate: f32,
    /// Preferred voice language
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            min_spacing_ms: 3_000,
            rate: 1.1,
            language: "en-US".to_string(),
        }
    }
}

impl VoiceConfig {
    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }
}

struct VoiceInner {
    sink: Box<dyn SpeechSink>,
    /// Session time of the last utterance (the rate-limit token)
    last_spoken: Option<Duration>,
}

/// Rate-limited voice. Clones share the sink and the rate-limit token.
#[derive(Clone)]
pub struct VoiceFeedback {
    config: Arc<VoiceConfig>,
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<VoiceInner>>,
}

impl VoiceFeedback {
    pub fn new(config: VoiceConfig, clock: Arc<dyn Clock>, sink: Box<dyn SpeechSink>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            inner: Arc::new(Mutex::new(VoiceInner {
                sink,
                last_spoken: None,
            })),
        }
    }

    /// Speak `text`. Unless `force` is set, the utterance is dropped when the
    /// previous one started less than the minimum spacing ago. A new
    /// utterance interrupts the one in flight.
    ///
    /// Returns whether the text was spoken.
    pub fn speak(&self, text: &str, force: bool) -> bool {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        if !force {
            if let Some(last) = inner.last_spoken {
                if now.saturating_sub(last) < self.config.min_spacing() {
                    debug!("Voice suppressed: {}", text);
                    return false;
                }
            }
        }

        inner.sink.cancel();
        inner.sink.utter(Utterance {
            text: text.to_string(),
            rate: self.config.rate,
            language: self.config.language.clone(),
        });
        inner.last_spoken = Some(now);
        true
    }

    /// Stop speaking without touching the rate limit
    pub fn silence(&self) {
        self.inner.lock().sink.cancel();
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }
}

impl std::fmt::Debug for VoiceFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceFeedback")
            .field("config", &self.config)
            .field("last_spoken", &self.inner.lock().last_spoken)
            .finish()
    }
}
