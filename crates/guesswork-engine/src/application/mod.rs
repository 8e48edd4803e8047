//! Application layer: asynchronous orchestration around the game state.

pub mod hint_scheduler;
pub mod recency_ledger;
pub mod round_engine;
pub mod static_fallback;
pub mod topic_cache;
