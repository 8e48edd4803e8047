//! Test ledger stores — mock `LedgerStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use guesswork_core::error::GameError;
use guesswork_core::ledger_store::LedgerStore;

/// A ledger store held in memory. Records how many times it was saved.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    labels: Mutex<Vec<String>>,
    saves: Mutex<usize>,
}

impl InMemoryLedgerStore {
    /// Create a store pre-populated with `labels`, oldest first.
    #[must_use]
    pub fn with_labels(labels: Vec<String>) -> Self {
        Self {
            labels: Mutex::new(labels),
            saves: Mutex::new(0),
        }
    }

    /// Returns the currently stored labels.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    /// Returns the number of `save` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn load(&self) -> Result<Vec<String>, GameError> {
        Ok(self.labels.lock().unwrap().clone())
    }

    async fn save(&self, labels: &[String]) -> Result<(), GameError> {
        *self.labels.lock().unwrap() = labels.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A ledger store that always fails. Useful for testing that persistence
/// errors are absorbed.
#[derive(Debug)]
pub struct FailingLedgerStore;

#[async_trait]
impl LedgerStore for FailingLedgerStore {
    async fn load(&self) -> Result<Vec<String>, GameError> {
        Err(GameError::Persistence("disk unavailable".into()))
    }

    async fn save(&self, _labels: &[String]) -> Result<(), GameError> {
        Err(GameError::Persistence("disk unavailable".into()))
    }
}
