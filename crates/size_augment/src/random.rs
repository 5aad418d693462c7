//! Random state owned by each augmenter.
//!
//! A stochastic augmenter advances its generator on every call; a
//! deterministic one replays the same seed on every call, so images,
//! keypoints and heatmaps submitted separately receive the same draws.

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
pub enum RandomState {
    /// Fresh draws per call.
    Stochastic(Mutex<StdRng>),
    /// Every call starts from the same frozen seed.
    Deterministic(u64),
}

impl RandomState {
    /// Seeded generator, or one seeded from the thread-local entropy source.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        RandomState::Stochastic(Mutex::new(rng))
    }

    pub fn deterministic(seed: u64) -> Self {
        RandomState::Deterministic(seed)
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, RandomState::Deterministic(_))
    }

    /// Generator for one augmentation call.
    ///
    /// Stochastic states derive a per-call seed and advance; deterministic
    /// states return an identically seeded generator every time.
    pub fn call_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.next_seed())
    }

    /// Seed to freeze into a deterministic copy.
    pub fn snapshot(&self) -> u64 {
        self.next_seed()
    }

    fn next_seed(&self) -> u64 {
        match self {
            RandomState::Stochastic(rng) => rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .random::<u64>(),
            RandomState::Deterministic(seed) => *seed,
        }
    }
}

impl Clone for RandomState {
    fn clone(&self) -> Self {
        match self {
            RandomState::Stochastic(rng) => RandomState::Stochastic(Mutex::new(
                rng.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            )),
            RandomState::Deterministic(seed) => RandomState::Deterministic(*seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_deterministic_replays() {
        let state = RandomState::deterministic(17);
        assert_eq!(state.call_rng().next_u64(), state.call_rng().next_u64());
    }

    #[test]
    fn test_stochastic_advances() {
        let state = RandomState::new(Some(3));
        assert_ne!(state.call_rng().next_u64(), state.call_rng().next_u64());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = RandomState::new(Some(99));
        let b = RandomState::new(Some(99));
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.call_rng().next_u64(), b.call_rng().next_u64());
    }
}
