//! Dice for battle resolution. SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.
//!
//! The engine only ever consumes randomness through the [`Dice`] trait, so tests
//! (and replays) can substitute a scripted source for the real generator.

use std::collections::VecDeque;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// A source of uniform draws. Every random decision in the engine is a
/// uniform `[0, 1)` draw or derived from one.
pub trait Dice {
    /// Next uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Bernoulli trial: true with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Uniform index into a collection of `len` elements. `len` must be > 0.
    fn pick(&mut self, len: usize) -> usize {
        let index = (self.uniform() * len as f64) as usize;
        index.min(len - 1)
    }

    /// Uniform integer in `lo..=hi`.
    fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi);
        let span = (hi - lo + 1) as f64;
        lo + (self.uniform() * span) as i32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Returns the next 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

impl Dice for Rng {
    /// Top 53 bits scaled into `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Fixed sequence of draws. Once the queue is exhausted every draw returns
/// the fallback value, which defaults to 1.0 so leftover chance checks fail
/// loudly (a probability is never >= 1.0 unless it is certain).
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 1.0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Dice for ScriptedDice {
    fn uniform(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn splitmix64_different_seeds_differ() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = Rng::new(42);
        for _ in 0..1000 {
            let draw = rng.uniform();
            assert!((0.0..1.0).contains(&draw), "draw out of range: {draw}");
        }
    }

    #[test]
    fn pick_covers_all_indices() {
        let mut rng = Rng::new(9);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[rng.pick(4)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn roll_range_is_inclusive() {
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            let roll = rng.roll_range(1, 3);
            assert!((1..=3).contains(&roll), "roll out of range: {roll}");
        }
    }

    #[test]
    fn scripted_dice_replays_queue_then_fallback() {
        let mut dice = ScriptedDice::new([0.0, 0.5]);
        assert_eq!(dice.uniform(), 0.0);
        assert_eq!(dice.uniform(), 0.5);
        assert_eq!(dice.uniform(), 1.0);
        assert!(!dice.chance(0.99));
    }
}
