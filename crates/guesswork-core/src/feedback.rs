//! Feedback cues emitted by the engine for the presentation layer.

use serde::Serialize;

/// A short audible or visual cue tied to a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// A hint message appeared.
    Blip,
    /// The player guessed correctly.
    Success,
    /// The player guessed wrong.
    Error,
}

/// Receives cues as the engine emits them. Implementations must not block.
pub trait FeedbackSink: Send + Sync {
    /// Play (or otherwise surface) a cue.
    fn play(&self, cue: Cue);
}

/// Sink that only records cues in the trace log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn play(&self, cue: Cue) {
        tracing::debug!(?cue, "feedback cue");
    }
}
