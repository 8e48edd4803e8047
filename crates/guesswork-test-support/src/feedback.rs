//! Test feedback sink that records every cue.

use std::sync::Mutex;

use guesswork_core::feedback::{Cue, FeedbackSink};

/// Collects cues in emission order.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    cues: Mutex<Vec<Cue>>,
}

impl RecordingFeedback {
    /// Returns a snapshot of the cues played so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().unwrap().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&self, cue: Cue) {
        self.cues.lock().unwrap().push(cue);
    }
}
