//! `PostgreSQL` implementation of the `LedgerStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use guesswork_core::error::GameError;
use guesswork_core::ledger_store::{LEDGER_STORAGE_KEY, LedgerStore};

use crate::schema::CREATE_LEDGER_TABLE;

/// PostgreSQL-backed ledger store.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
    storage_key: String,
}

impl PgLedgerStore {
    /// Creates a store using the default storage key.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_key(pool, LEDGER_STORAGE_KEY)
    }

    /// Creates a store that reads and writes the row for `storage_key`.
    #[must_use]
    pub fn with_key(pool: PgPool, storage_key: impl Into<String>) -> Self {
        Self {
            pool,
            storage_key: storage_key.into(),
        }
    }

    /// Creates the ledger table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Persistence` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), GameError> {
        sqlx::raw_sql(CREATE_LEDGER_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| GameError::Persistence(format!("ledger schema: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn load(&self) -> Result<Vec<String>, GameError> {
        let row: Option<Json<Vec<String>>> =
            sqlx::query_scalar("SELECT labels FROM recency_ledger WHERE storage_key = $1")
                .bind(&self.storage_key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| GameError::Persistence(format!("ledger load: {e}")))?;

        Ok(row.map(|Json(labels)| labels).unwrap_or_default())
    }

    async fn save(&self, labels: &[String]) -> Result<(), GameError> {
        sqlx::query(
            r"INSERT INTO recency_ledger (storage_key, labels, updated_at)
              VALUES ($1, $2, NOW())
              ON CONFLICT (storage_key)
              DO UPDATE SET labels = EXCLUDED.labels, updated_at = NOW()",
        )
        .bind(&self.storage_key)
        .bind(Json(labels))
        .execute(&self.pool)
        .await
        .map_err(|e| GameError::Persistence(format!("ledger save: {e}")))?;
        Ok(())
    }
}
