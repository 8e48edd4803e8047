//! Engine tuning knobs.

use std::time::Duration;

use guesswork_core::rng::DeterministicRng;

/// An inclusive range of delays, sampled uniformly at millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    /// Shortest delay in milliseconds.
    pub min_ms: u32,
    /// Longest delay in milliseconds.
    pub max_ms: u32,
}

impl DelayRange {
    /// Creates a range; bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min_ms: u32, max_ms: u32) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// Draws one delay from the range.
    pub fn sample(self, rng: &mut dyn DeterministicRng) -> Duration {
        Duration::from_millis(u64::from(rng.next_u32_range(self.min_ms, self.max_ms)))
    }
}

/// Timing and rule constants for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seconds on the clock at the start of every round.
    pub round_duration_secs: u32,
    /// Lives at the start of a run.
    pub starting_lives: u32,
    /// Minimum typing time before the first message of a round.
    pub first_typing_delay: Duration,
    /// Minimum typing time for every later message.
    pub typing_delay: DelayRange,
    /// Pause between a message appearing and the next persona starting.
    pub message_interval: DelayRange,
    /// Probability of replaying an earlier hint instead of asking for a new one.
    pub repeat_chance: f64,
    /// Distinct hints a round must have produced before replays are allowed.
    pub repeat_min_hints: usize,
    /// Number of recent messages sent to the provider as context.
    pub context_window: usize,
    /// Maximum labels kept by the recency ledger.
    pub ledger_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: 20,
            starting_lives: 3,
            first_typing_delay: Duration::from_millis(1000),
            typing_delay: DelayRange::new(500, 1500),
            message_interval: DelayRange::new(1000, 3000),
            repeat_chance: 0.2,
            repeat_min_hints: 3,
            context_window: 5,
            ledger_capacity: 100,
        }
    }
}
