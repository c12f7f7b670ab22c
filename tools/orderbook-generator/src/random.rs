//! Pluggable randomness
//!
//! The generator draws every random number through `RandomSource`, so a
//! seeded `ChaCha8Rng` gives bit-identical books across runs.

use rand::{Rng, RngCore};

/// Source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `lo..=hi`.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        lo + offset.min(hi - lo)
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Replays a fixed cycle of values.
    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1_000 {
            let v = rng.range(0.8, 1.2);
            assert!((0.8..1.2).contains(&v));
        }
    }

    #[test]
    fn test_int_inclusive_hits_both_ends() {
        let mut src = Scripted { values: vec![0.0, 0.999_999], cursor: 0 };
        assert_eq!(src.int_inclusive(-2, 2), -2);
        assert_eq!(src.int_inclusive(-2, 2), 2);
        assert_eq!(src.int_inclusive(5, 5), 5);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }
}
