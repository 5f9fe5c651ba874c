//! RNG oracle for deterministic random number generation.
//!
//! Randomized action quantities (spawn counts, sound picks, spark speeds,
//! headings) draw from a stateless generator keyed by a per-roll seed, so two
//! runs with the same game seed and trigger sequence produce identical rolls.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, range)`. A non-positive range yields 0.
    fn below(&self, seed: u64, range: i32) -> i32 {
        if range <= 0 {
            return 0;
        }
        (self.next_u32(seed) % range as u32) as i32
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derives the seed for one roll.
///
/// * `game_seed` - level seed
/// * `nonce` - global roll counter, advanced after every draw
/// * `object` - slot index of the object the roll concerns (0 when none)
/// * `context` - pool index of the record making the roll
pub fn compute_seed(game_seed: u64, nonce: u64, object: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (object as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        let seed = compute_seed(42, 3, 1, 0);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
        assert_ne!(seed, compute_seed(42, 4, 1, 0));
    }

    #[test]
    fn below_stays_in_range() {
        let rng = PcgRng;
        for nonce in 0..200 {
            let value = rng.below(compute_seed(7, nonce, 0, 0), 3);
            assert!((0..3).contains(&value));
        }
        assert_eq!(rng.below(99, 0), 0);
        assert_eq!(rng.below(99, -5), 0);
    }
}
