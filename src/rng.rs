//! Random sources for the simulations
//!
//! Every random decision in the crate goes through [`RandomSource::next_f64`],
//! so a run is fully reproducible from its seed and any probabilistic branch
//! can be forced in tests with [`ScriptedRandom`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A uniform random source over `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `[lo, hi]` (inclusive)
    fn int_between(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(hi >= lo);
        let span = f64::from(hi - lo + 1);
        lo + (self.next_f64() * span).floor() as i32
    }

    /// Uniform index into a collection of `len` elements
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

/// Seeded PCG32 generator (the default source)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the operating system's entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed queue of values, then repeats a fallback forever
///
/// Used for deterministic replays and for forcing specific branches
/// (e.g. a vote that always passes).
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            queue: values.into_iter().map(unit_interval).collect(),
            fallback: unit_interval(fallback),
        }
    }

    /// A source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }

    /// Append more scripted values
    pub fn push(&mut self, value: f64) {
        self.queue.push_back(unit_interval(value));
    }

    /// Scripted values not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

/// Keep scripted values inside `[0, 1)`
fn unit_interval(value: f64) -> f64 {
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

/// A table entry with a selection weight
pub trait Weighted {
    fn weight(&self) -> f64;
}

/// Pick an entry by walking the cumulative weights of `table`
///
/// Falls back to the first entry when float rounding leaves the draw past the
/// last bucket. Returns `None` only for an empty table.
pub fn pick_weighted<'a, T: Weighted, R: RandomSource + ?Sized>(
    rng: &mut R,
    table: &'a [T],
) -> Option<&'a T> {
    let total: f64 = table.iter().map(Weighted::weight).sum();
    let roll = rng.next_f64() * total;
    let mut cumulative = 0.0;
    for entry in table {
        cumulative += entry.weight();
        if roll < cumulative {
            return Some(entry);
        }
    }
    table.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(&'static str, f64);

    impl Weighted for Entry {
        fn weight(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_int_between_bounds() {
        let mut rng = ScriptedRandom::new([0.0, 0.999_999], 0.5);
        assert_eq!(rng.int_between(2, 5), 2);
        assert_eq!(rng.int_between(2, 5), 5);
        assert_eq!(rng.int_between(-3, 3), 0);
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut rng = ScriptedRandom::new([0.1, 0.2], 0.9);
        assert_eq!(rng.remaining(), 2);
        assert!(rng.chance(0.15));
        assert!(!rng.chance(0.15));
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_pick_weighted_buckets() {
        let table = [Entry("a", 0.6), Entry("b", 0.1), Entry("c", 0.3)];
        let mut rng = ScriptedRandom::new([0.0, 0.59, 0.61, 0.65, 0.71, 0.99], 0.0);
        let picks: Vec<_> = (0..6)
            .map(|_| pick_weighted(&mut rng, &table).map(|e| e.0))
            .collect();
        assert_eq!(
            picks,
            vec![Some("a"), Some("a"), Some("b"), Some("b"), Some("c"), Some("c")]
        );
    }

    #[test]
    fn test_pick_weighted_rounding_fallback() {
        // Weights that sum short of the draw fall back to the first entry
        let table = [Entry("a", 0.0), Entry("b", 0.0)];
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(pick_weighted(&mut rng, &table).map(|e| e.0), Some("a"));

        let empty: [Entry; 0] = [];
        assert!(pick_weighted(&mut rng, &empty).is_none());
    }
}
