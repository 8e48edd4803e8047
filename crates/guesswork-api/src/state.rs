//! Shared application state.

use guesswork_engine::RoundEngine;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single game served by this process.
    pub engine: RoundEngine,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(engine: RoundEngine) -> Self {
        Self { engine }
    }
}
