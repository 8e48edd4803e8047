//! Bounded, persisted memory of recently used topic labels.
//!
//! The ledger survives across runs and sessions: it is loaded once at
//! startup and rewritten whenever a new label is recorded. Starting a new
//! game never clears it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use guesswork_core::ledger_store::LedgerStore;
use tracing::{debug, warn};

struct LedgerInner {
    labels: Mutex<VecDeque<String>>,
    capacity: usize,
    store: Arc<dyn LedgerStore>,
    // Serializes writes so an older snapshot never lands after a newer one.
    persist: tokio::sync::Mutex<()>,
}

/// Sliding window of the most recent topic labels, oldest first.
#[derive(Clone)]
pub struct RecencyLedger {
    inner: Arc<LedgerInner>,
}

impl std::fmt::Debug for RecencyLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyLedger")
            .field("len", &self.len())
            .field("capacity", &self.inner.capacity)
            .finish_non_exhaustive()
    }
}

impl RecencyLedger {
    /// Loads the ledger from `store`, keeping only the newest `capacity`
    /// labels. A failed read is logged and treated as an empty history.
    pub async fn load(store: Arc<dyn LedgerStore>, capacity: usize) -> Self {
        let stored = match store.load().await {
            Ok(labels) => labels,
            Err(e) => {
                warn!(error = %e, "could not load topic history; starting empty");
                Vec::new()
            }
        };

        let mut labels = VecDeque::with_capacity(capacity);
        for label in stored {
            if !labels.contains(&label) {
                labels.push_back(label);
            }
        }
        while labels.len() > capacity {
            labels.pop_front();
        }
        debug!(count = labels.len(), "topic history loaded");

        Self {
            inner: Arc::new(LedgerInner {
                labels: Mutex::new(labels),
                capacity,
                store,
                persist: tokio::sync::Mutex::new(()),
            }),
        }
    }

    fn labels(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.inner
            .labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// All labels, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.labels().iter().cloned().collect()
    }

    /// Whether `label` is in the window.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }

    /// Number of labels held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels().len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records a label and persists the window. Labels already present keep
    /// their position and trigger no write. Persistence failures are logged.
    pub async fn record(&self, label: &str) {
        {
            let mut labels = self.labels();
            if labels.iter().any(|l| l == label) {
                return;
            }
            labels.push_back(label.to_owned());
            while labels.len() > self.inner.capacity {
                labels.pop_front();
            }
        }

        let _write = self.inner.persist.lock().await;
        let snapshot = self.snapshot();
        if let Err(e) = self.inner.store.save(&snapshot).await {
            warn!(error = %e, "could not persist topic history");
        }
    }
}
