//! Guesswork — recency ledger persistence.
//!
//! Two [`LedgerStore`](guesswork_core::ledger_store::LedgerStore)
//! implementations: a JSON file for single-player installs and a
//! PostgreSQL table for hosted deployments.

pub mod json_file_store;
pub mod pg_ledger_store;
pub mod schema;

pub use json_file_store::JsonFileLedgerStore;
pub use pg_ledger_store::PgLedgerStore;
