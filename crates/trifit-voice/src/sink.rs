//! Speech sinks - where utterances end up

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

/// One thing to say
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Speaking rate multiplier (1.0 = normal)
    pub rate: f32,
    /// BCP 47 language tag preferred for the voice
    pub language: String,
}

/// Speech output (text-to-speech engine, logger, test recorder)
pub trait SpeechSink: Send {
    /// Start speaking. Returns immediately.
    fn utter(&mut self, utterance: Utterance);

    /// Stop whatever is being spoken
    fn cancel(&mut self);
}

/// Sink that logs utterances instead of speaking them
#[derive(Debug, Default)]
pub struct TracingSink;

impl SpeechSink for TracingSink {
    fn utter(&mut self, utterance: Utterance) {
        info!(target: "trifit::voice", "say [{}]: {}", utterance.language, utterance.text);
    }

    fn cancel(&mut self) {}
}

/// Event seen by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Uttered(String),
    Cancelled,
}

/// Sink that records everything; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything uttered so far, in order
    pub fn spoken(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Uttered(text) => Some(text.clone()),
                SinkEvent::Cancelled => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl SpeechSink for RecordingSink {
    fn utter(&mut self, utterance: Utterance) {
        self.events.lock().push(SinkEvent::Uttered(utterance.text));
    }

    fn cancel(&mut self) {
        self.events.lock().push(SinkEvent::Cancelled);
    }
}
