//! Guesswork — HTTP API.
//!
//! Exposes the round engine's player operations and its read-only game
//! snapshot as JSON endpoints under `/api/v1/game`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
