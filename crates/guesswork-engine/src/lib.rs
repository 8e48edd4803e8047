//! Guesswork — round orchestration engine.
//!
//! Owns the authoritative game state and drives every transition: starting
//! runs and rounds, scheduling persona hints, resolving guesses and timer
//! expiry, awarding badges. Topic generation is hidden behind a single-slot
//! prefetch cache, and recently used topics are remembered across sessions
//! by the recency ledger.

pub mod application;
pub mod config;
pub mod domain;

pub use application::recency_ledger::RecencyLedger;
pub use application::round_engine::{EngineDeps, GameSnapshot, RoundEngine};
pub use application::topic_cache::{TopicCache, TopicDraw};
pub use config::{DelayRange, EngineConfig};
pub use domain::badges::Badge;
pub use domain::state::{GamePhase, GameState, GuessOutcome, Message, RoundResult};
