//! Topic prefetching behind a single-slot cache.
//!
//! At most one speculative request is outstanding at any time, whatever its
//! tier. A second prefetch while one is in flight is dropped, not queued.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use guesswork_core::model::{Difficulty, Language, Topic};
use guesswork_core::provider::{ContentProvider, GeneratedTopic, TopicRequest};
use guesswork_core::rng::{self, SharedRng, shuffle};
use tracing::{debug, warn};

use super::recency_ledger::RecencyLedger;

/// Number of wrong answers shown next to the topic.
pub const DISTRACTOR_COUNT: usize = 3;

/// A topic together with its shuffled option set.
#[derive(Debug, Clone)]
pub struct TopicDraw {
    /// The correct answer.
    pub topic: Topic,
    /// Four choices, exactly one of which is `topic`.
    pub options: Vec<Topic>,
}

#[derive(Debug)]
struct CachedDraw {
    draw: TopicDraw,
    difficulty: Difficulty,
    language: Language,
}

struct CacheInner {
    provider: Arc<dyn ContentProvider>,
    ledger: RecencyLedger,
    rng: SharedRng,
    slot: Mutex<Option<CachedDraw>>,
    prefetch_in_flight: AtomicBool,
    epoch: AtomicU64,
}

/// Clears the in-flight flag even if the prefetch future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Hides provider latency by keeping the next topic ready.
#[derive(Clone)]
pub struct TopicCache {
    inner: Arc<CacheInner>,
}

impl std::fmt::Debug for TopicCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicCache")
            .field("cached", &self.cached_difficulty())
            .field("prefetching", &self.is_prefetching())
            .finish_non_exhaustive()
    }
}

impl TopicCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>, ledger: RecencyLedger, rng: SharedRng) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                provider,
                ledger,
                rng,
                slot: Mutex::new(None),
                prefetch_in_flight: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CachedDraw>> {
        self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tier of the cached draw, if any.
    #[must_use]
    pub fn cached_difficulty(&self) -> Option<Difficulty> {
        self.slot().as_ref().map(|c| c.difficulty)
    }

    /// Whether a speculative request is outstanding.
    #[must_use]
    pub fn is_prefetching(&self) -> bool {
        self.inner.prefetch_in_flight.load(Ordering::SeqCst)
    }

    /// Empties the slot and invalidates any prefetch still in flight.
    pub fn reset(&self) {
        let mut slot = self.slot();
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        *slot = None;
    }

    /// Returns a topic for `difficulty`, or `None` when the provider failed
    /// and the caller must fall back to static content.
    ///
    /// A cached draw is served immediately and a refill is started in the
    /// background. Otherwise the provider is asked directly.
    pub async fn get_topic(&self, difficulty: Difficulty, language: Language) -> Option<TopicDraw> {
        if let Some(draw) = self.take_cached(difficulty, language) {
            debug!(%difficulty, label = %draw.topic.label, "serving prefetched topic");
            self.spawn_prefetch(difficulty, language);
            return Some(draw);
        }

        let request = TopicRequest {
            difficulty,
            recent_labels: self.inner.ledger.snapshot(),
            language,
        };
        let generated = match self.inner.provider.generate_topic(&request).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(error = %e, %difficulty, "topic generation failed; static fallback required");
                return None;
            }
        };
        let draw = self.assemble(generated)?;

        self.inner.ledger.record(&draw.topic.label).await;
        self.spawn_prefetch(difficulty, language);
        Some(draw)
    }

    /// Starts [`prefetch`](Self::prefetch) on a background task.
    pub fn spawn_prefetch(&self, difficulty: Difficulty, language: Language) {
        let cache = self.clone();
        tokio::spawn(async move {
            cache.prefetch(difficulty, language).await;
        });
    }

    /// Fetches a topic into the slot. Returns whether a draw was stored.
    ///
    /// No-op while another prefetch is in flight, or when the slot already
    /// holds a draw for this tier and language.
    pub async fn prefetch(&self, difficulty: Difficulty, language: Language) -> bool {
        if self
            .inner
            .prefetch_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(%difficulty, "prefetch already in flight; dropped");
            return false;
        }
        let _in_flight = InFlight(&self.inner.prefetch_in_flight);

        if self
            .slot()
            .as_ref()
            .is_some_and(|c| c.difficulty == difficulty && c.language == language)
        {
            debug!(%difficulty, "cache already warm");
            return false;
        }

        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        let request = TopicRequest {
            difficulty,
            recent_labels: self.inner.ledger.snapshot(),
            language,
        };
        let generated = match self.inner.provider.generate_topic(&request).await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(error = %e, %difficulty, "prefetch failed");
                return false;
            }
        };
        let Some(draw) = self.assemble(generated) else {
            return false;
        };
        let label = draw.topic.label.clone();

        {
            let mut slot = self.slot();
            if self.inner.epoch.load(Ordering::SeqCst) != epoch {
                debug!(%label, "discarding prefetch from before reset");
                return false;
            }
            *slot = Some(CachedDraw {
                draw,
                difficulty,
                language,
            });
        }

        self.inner.ledger.record(&label).await;
        debug!(%difficulty, %label, "topic prefetched");
        true
    }

    fn take_cached(&self, difficulty: Difficulty, language: Language) -> Option<TopicDraw> {
        let mut slot = self.slot();
        match slot.as_ref() {
            Some(c) if c.difficulty == difficulty && c.language == language => {
                slot.take().map(|c| c.draw)
            }
            _ => None,
        }
    }

    fn assemble(&self, generated: GeneratedTopic) -> Option<TopicDraw> {
        let label = generated.label.trim();
        if label.is_empty() || generated.distractors.len() < DISTRACTOR_COUNT {
            warn!(
                label,
                distractors = generated.distractors.len(),
                "unusable topic response; treating as failure"
            );
            return None;
        }

        let topic = Topic::new(label, Vec::new());
        let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
        options.push(topic.clone());
        options.extend(
            generated
                .distractors
                .into_iter()
                .take(DISTRACTOR_COUNT)
                .map(Topic::distractor),
        );
        shuffle(&mut *rng::lock(&self.inner.rng), &mut options);

        Some(TopicDraw { topic, options })
    }
}
