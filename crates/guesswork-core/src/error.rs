//! Error taxonomy for the game.
//!
//! Provider failures are expected and frequent; the engine absorbs every
//! [`ProviderError`] at the boundary and falls back to static content.
//! [`GameError`] covers the few failures that can reach a caller.

use thiserror::Error;

/// Failure reported by a content provider for a single request.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (connection, timeout, ...).
    #[error("provider transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The provider answered, but the payload was unusable.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Errors surfaced by game operations and infrastructure adapters.
#[derive(Debug, Error)]
pub enum GameError {
    /// The operation is not allowed in the current phase.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Reading or writing persisted state failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}
