//! Randomness for reward rolls and mission draws.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the engine's random decisions.
pub trait RandomSource: Send {
    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// An index in `0..len` (0 when `len` is 0).
    fn pick(&mut self, len: usize) -> usize;
}

/// A [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn chance(&mut self, probability: f64) -> bool {
        if !probability.is_finite() || probability <= 0.0 {
            return false;
        }
        self.rng.gen_bool(probability.min(1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays scripted outcomes.
///
/// Once a script runs dry, `chance` answers `false` and `pick` answers 0.
/// Picks beyond the range are clamped to the last index.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        let value = self.picks.pop_front().unwrap_or(0);
        value.min(len.saturating_sub(1))
    }
}
