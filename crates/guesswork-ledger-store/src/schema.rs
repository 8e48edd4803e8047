//! Ledger store database schema.

/// SQL to create the ledger table. One row per storage key.
pub const CREATE_LEDGER_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS recency_ledger (
    storage_key VARCHAR(255) PRIMARY KEY,
    labels      JSONB NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
