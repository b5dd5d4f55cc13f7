//! Utilities.
use rand::{rngs::StdRng, SeedableRng};

/// Creates a random number generator from an optional seed.
///
/// If `seed` is `None`, the seed is drawn from the OS entropy source.
/// Returns the generator and the seed it was created with.
pub fn np_random(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    (StdRng::seed_from_u64(seed), seed)
}

#[cfg(test)]
mod tests {
    use super::np_random;
    use rand::Rng;

    #[test]
    fn test_np_random_reproducible() {
        let (mut rng1, seed1) = np_random(Some(42));
        let (mut rng2, seed2) = np_random(Some(42));
        assert_eq!(seed1, 42);
        assert_eq!(seed2, 42);
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_np_random_without_seed() {
        let (mut rng1, seed) = np_random(None);
        let (mut rng2, _) = np_random(Some(seed));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
