use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two random decisions the simulation makes: whether the
/// formation fires on a move, and which alien pulls the trigger.
pub trait RandomSource {
    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.chance(0.2), b.chance(0.2));
            assert_eq!(a.pick(5), b.pick(5));
        }
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut rng = RngSource::seeded(42);
        for len in 1..10 {
            assert!(rng.pick(len) < len);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RngSource::seeded(1);
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
    }
}
