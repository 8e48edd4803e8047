//! Test content providers — mock `ContentProvider` implementations.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use guesswork_core::error::ProviderError;
use guesswork_core::provider::{ContentProvider, GeneratedTopic, HintRequest, TopicRequest};
use tokio::sync::Semaphore;

fn synthesized_topic(n: usize) -> GeneratedTopic {
    GeneratedTopic {
        label: format!("Topic {n}"),
        distractors: vec![
            format!("Decoy {n}a"),
            format!("Decoy {n}b"),
            format!("Decoy {n}c"),
        ],
    }
}

/// A provider that succeeds on every call and records every request.
///
/// Topics are served from a script first, then synthesized as `Topic N`
/// with three decoys. Hints are unique lines `hint N`.
#[derive(Debug, Default)]
pub struct ScriptedContentProvider {
    script: Mutex<VecDeque<GeneratedTopic>>,
    topic_requests: Mutex<Vec<TopicRequest>>,
    hint_requests: Mutex<Vec<HintRequest>>,
    topics_served: AtomicUsize,
    hints_served: AtomicUsize,
}

impl ScriptedContentProvider {
    /// Create a provider that serves `topics` in order before synthesizing.
    #[must_use]
    pub fn with_topics(topics: Vec<GeneratedTopic>) -> Self {
        Self {
            script: Mutex::new(topics.into()),
            ..Self::default()
        }
    }

    /// Returns all topic requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn topic_requests(&self) -> Vec<TopicRequest> {
        self.topic_requests.lock().unwrap().clone()
    }

    /// Returns all hint requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn hint_requests(&self) -> Vec<HintRequest> {
        self.hint_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProvider for ScriptedContentProvider {
    async fn generate_topic(
        &self,
        request: &TopicRequest,
    ) -> Result<GeneratedTopic, ProviderError> {
        self.topic_requests.lock().unwrap().push(request.clone());
        let n = self.topics_served.fetch_add(1, Ordering::SeqCst) + 1;
        let scripted = self.script.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| synthesized_topic(n)))
    }

    async fn generate_hint(&self, request: &HintRequest) -> Result<String, ProviderError> {
        self.hint_requests.lock().unwrap().push(request.clone());
        let n = self.hints_served.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("hint {n}"))
    }
}

/// A provider that fails every call, counting attempts.
#[derive(Debug, Default)]
pub struct FailingContentProvider {
    topic_calls: AtomicUsize,
    hint_calls: AtomicUsize,
}

impl FailingContentProvider {
    /// Number of `generate_topic` attempts.
    pub fn topic_calls(&self) -> usize {
        self.topic_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_hint` attempts.
    pub fn hint_calls(&self) -> usize {
        self.hint_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for FailingContentProvider {
    async fn generate_topic(
        &self,
        _request: &TopicRequest,
    ) -> Result<GeneratedTopic, ProviderError> {
        self.topic_calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Transport("connection refused".into()))
    }

    async fn generate_hint(&self, _request: &HintRequest) -> Result<String, ProviderError> {
        self.hint_calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Transport("connection refused".into()))
    }
}

/// A provider whose calls block until the test releases them, so tests can
/// interleave state transitions with in-flight requests.
#[derive(Debug)]
pub struct GatedContentProvider {
    topic_gate: Semaphore,
    hint_gate: Semaphore,
    topic_calls: AtomicUsize,
    hint_calls: AtomicUsize,
}

impl Default for GatedContentProvider {
    fn default() -> Self {
        Self {
            topic_gate: Semaphore::new(0),
            hint_gate: Semaphore::new(0),
            topic_calls: AtomicUsize::new(0),
            hint_calls: AtomicUsize::new(0),
        }
    }
}

impl GatedContentProvider {
    /// Let `n` pending or future topic calls complete.
    pub fn release_topics(&self, n: usize) {
        self.topic_gate.add_permits(n);
    }

    /// Let `n` pending or future hint calls complete.
    pub fn release_hints(&self, n: usize) {
        self.hint_gate.add_permits(n);
    }

    /// Number of `generate_topic` calls started.
    pub fn topic_calls(&self) -> usize {
        self.topic_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_hint` calls started.
    pub fn hint_calls(&self) -> usize {
        self.hint_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for GatedContentProvider {
    async fn generate_topic(
        &self,
        _request: &TopicRequest,
    ) -> Result<GeneratedTopic, ProviderError> {
        let n = self.topic_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let permit = self
            .topic_gate
            .acquire()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        permit.forget();
        Ok(synthesized_topic(n))
    }

    async fn generate_hint(&self, _request: &HintRequest) -> Result<String, ProviderError> {
        let n = self.hint_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let permit = self
            .hint_gate
            .acquire()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        permit.forget();
        Ok(format!("gated hint {n}"))
    }
}
