use std::ops::RangeInclusive;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fills a new array of `len` values drawn uniformly from `range`.
///
/// A fixed `seed` makes runs reproducible; `None` seeds from the OS.
pub fn random_array(len: usize, range: RangeInclusive<i32>, seed: Option<u64>) -> Vec<i32> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dist = Uniform::from(range);
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}
