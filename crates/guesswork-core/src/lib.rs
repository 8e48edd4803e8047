//! Guesswork Core — shared game model and collaborator abstractions.
//!
//! This crate defines the vocabulary every other crate speaks: difficulty
//! tiers, languages, topics, personas, and the traits behind which the
//! engine's external collaborators (content generation, time, randomness,
//! feedback cues) live. It contains no orchestration and no I/O.

pub mod clock;
pub mod error;
pub mod feedback;
pub mod ledger_store;
pub mod model;
pub mod provider;
pub mod rng;
