//! Bounded random numbers.

use rand::Rng;

use crate::assertion::{AssertMode, check};

/// Pick an integer uniformly from the inclusive range between `start` and `end`.
///
/// Both bounds must be positive. Reversed bounds are swapped.
pub fn random_number<R: Rng>(rng: &mut R, mode: AssertMode, start: u64, end: u64) -> u64 {
    check(mode, start > 0, "\"start\" must be a positive integer");
    check(mode, end > 0, "\"end\" must be a positive integer");

    let (low, high) = if start > end { (end, start) } else { (start, end) };
    rng.random_range(low..=high)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let n = random_number(&mut rng, AssertMode::Fatal, 1, 40);
            assert!((1..=40).contains(&n));
        }
    }

    #[test]
    fn test_swaps_reversed_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let n = random_number(&mut rng, AssertMode::Fatal, 1500, 750);
            assert!((750..=1500).contains(&n));
        }
    }

    #[test]
    fn test_single_value_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_number(&mut rng, AssertMode::Fatal, 5, 5), 5);
    }

    #[test]
    fn test_zero_bound_is_logged_not_fatal() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = random_number(&mut rng, AssertMode::Log, 0, 3);
        assert!(n <= 3);
    }

    #[test]
    #[should_panic(expected = "must be a positive integer")]
    fn test_zero_bound_is_fatal_in_debug() {
        let mut rng = StdRng::seed_from_u64(1);
        random_number(&mut rng, AssertMode::Fatal, 0, 3);
    }
}
