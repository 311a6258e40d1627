//! Seed derivation and unbiased random draws for maze carving.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::rand_core::Rng;

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh seed for callers that did not ask for a reproducible maze.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub(crate) fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Uniform draw from `0..bound` by rejecting the tail of the `u64` range.
pub(crate) fn uniform_below<R: Rng + ?Sized>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0);
    let bound = bound as u64;
    let limit = u64::MAX - (u64::MAX % bound + 1) % bound;
    loop {
        let value = rng.next_u64();
        if value <= limit {
            return (value % bound) as usize;
        }
    }
}

/// Fisher-Yates shuffle; every permutation is equally likely.
pub(crate) fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for upper in (1..items.len()).rev() {
        let pick = uniform_below(rng, upper + 1);
        items.swap(upper, pick);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn uniform_below_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for bound in 1..=9 {
            for _ in 0..200 {
                assert!(uniform_below(&mut rng, bound) < bound);
            }
        }
    }

    #[test]
    fn uniform_below_hits_every_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let seen: BTreeSet<usize> = (0..500).map(|_| uniform_below(&mut rng, 4)).collect();
        assert_eq!(seen, (0..4).collect());
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut items = [10, 20, 30, 40, 50];
        shuffle(&mut rng, &mut items);
        let mut sorted = items;
        sorted.sort_unstable();
        assert_eq!(sorted, [10, 20, 30, 40, 50]);
    }

    #[test]
    fn shuffle_of_four_reaches_all_orders() {
        let mut rng = ChaCha8Rng::seed_from_u64(2_024);
        let mut orders = BTreeSet::new();
        for _ in 0..2_000 {
            let mut items = [0_u8, 1, 2, 3];
            shuffle(&mut rng, &mut items);
            orders.insert(items);
        }
        assert_eq!(orders.len(), 24);
    }

    #[test]
    fn mix_seed_spreads_neighbouring_inputs() {
        assert_ne!(mix_seed(1), mix_seed(2));
        assert_eq!(mix_seed(42), mix_seed(42));
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
