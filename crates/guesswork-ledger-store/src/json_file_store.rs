//! JSON file implementation of the `LedgerStore` trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use guesswork_core::error::GameError;
use guesswork_core::ledger_store::LedgerStore;

/// Stores the ledger as a JSON array of strings in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LedgerStore for JsonFileLedgerStore {
    async fn load(&self) -> Result<Vec<String>, GameError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(GameError::Persistence(format!(
                    "reading {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            GameError::Persistence(format!("parsing {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, labels: &[String]) -> Result<(), GameError> {
        let serialized = serde_json::to_string(labels)
            .map_err(|e| GameError::Persistence(format!("serializing ledger: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GameError::Persistence(format!("creating {}: {e}", parent.display()))
            })?;
        }

        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|e| GameError::Persistence(format!("writing {}: {e}", self.path.display())))
    }
}
