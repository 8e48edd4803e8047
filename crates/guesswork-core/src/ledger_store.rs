//! Persistence abstraction for the recency ledger.

use async_trait::async_trait;

use crate::error::GameError;

/// Fixed identifier under which the recently used topic labels are stored.
pub const LEDGER_STORAGE_KEY: &str = "guess-the-topic-played";

/// Durable storage for the list of recently used topic labels.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the stored labels, oldest first. Missing storage is an empty list.
    async fn load(&self) -> Result<Vec<String>, GameError>;

    /// Replace the stored labels with `labels`, oldest first.
    async fn save(&self, labels: &[String]) -> Result<(), GameError>;
}
