//! Linear congruential generator
//!
//! The classic `rand()` constants; only the draw order matters, not quality.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next value in 0..=0x7FFF
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.state >> 16) & 0x7FFF
    }

    /// Next value in 0..n
    pub fn below(&mut self, n: u32) -> u32 {
        self.next() % n.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = Lcg::new(1);
        // state = 1103527590 -> >> 16 = 16838
        assert_eq!(rng.next(), 16838);
        assert_eq!(rng.next(), 5758);
        assert_eq!(rng.next(), 10113);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(7);
        b.reseed(42);
        for _ in 0..16 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_below_range() {
        let mut rng = Lcg::new(12345);
        for _ in 0..100 {
            assert!(rng.below(6) < 6);
        }
        assert_eq!(rng.below(0), 0);
    }
}
