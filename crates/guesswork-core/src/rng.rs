//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a mock or scripted
//! implementation is injected so shuffles and pacing are repeatable.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RNG shared between the engine's components.
pub type SharedRng = Arc<Mutex<dyn DeterministicRng + Send>>;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Seeds from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds from a fixed value, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Locks a shared RNG, recovering the guard if a holder panicked.
pub fn lock(rng: &SharedRng) -> MutexGuard<'_, dyn DeterministicRng + Send + 'static> {
    rng.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Picks an index in `[0, len)`. `len` must be non-zero.
pub fn pick_index(rng: &mut dyn DeterministicRng, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index called on an empty range");
    let max = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
    let picked = usize::try_from(rng.next_u32_range(0, max)).unwrap_or(usize::MAX);
    picked.min(len.saturating_sub(1))
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn choose<'a, T>(rng: &mut dyn DeterministicRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(pick_index(rng, items.len()))
}

/// Fisher-Yates shuffle driven by the injected RNG.
pub fn shuffle<T>(rng: &mut dyn DeterministicRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = pick_index(rng, i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_stays_in_range() {
        let mut rng = SystemRng::seeded(7);
        for _ in 0..200 {
            let v = rng.next_u32_range(3, 9);
            assert!((3..=9).contains(&v));
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = SystemRng::seeded(1);
        assert_eq!(rng.next_u32_range(4, 4), 4);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = SystemRng::seeded(42);
        let mut items = vec![1, 2, 3, 4, 5, 6];

        shuffle(&mut rng, &mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_choose_on_empty_slice_is_none() {
        let mut rng = SystemRng::seeded(3);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(choose(&mut rng, &[9]), Some(&9));
    }
}
