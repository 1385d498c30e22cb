//! Contiguous work partitioning.
//!
//! A plan splits `[0, len)` into at most `workers` non-overlapping ranges whose
//! union is the full range. Chunk lengths differ by at most one, with the
//! longer chunks first, so the plan is a pure function of `(len, workers)`.

use std::ops::Range;

/// One worker's share of the array: the half-open range `[lo, hi)`.
pub type Partition = Range<usize>;

/// Splits `[0, len)` into balanced contiguous partitions.
///
/// Never yields an empty partition: with fewer elements than workers the
/// plan shrinks to one partition per element. `len == 0` yields no partitions.
pub fn plan(len: usize, workers: usize) -> Vec<Partition> {
    if len == 0 {
        return Vec::new();
    }

    let chunks = workers.clamp(1, len);
    let base = len / chunks;
    let extra = len % chunks;

    let mut parts = Vec::with_capacity(chunks);
    let mut lo = 0;
    for i in 0..chunks {
        let hi = lo + base + usize::from(i < extra);
        parts.push(lo..hi);
        lo = hi;
    }
    debug_assert_eq!(lo, len);
    parts
}

/// Worker count used when the caller leaves the choice to the runtime.
pub fn runtime_workers() -> usize {
    rayon::current_num_threads().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plan_even_split() {
        assert_eq!(plan(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_plan_uneven_split_front_loads_remainder() {
        assert_eq!(plan(10, 4), vec![0..3, 3..6, 6..8, 8..10]);
    }

    #[test]
    fn test_plan_more_workers_than_elements() {
        assert_eq!(plan(3, 16), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_plan_zero_workers_means_one() {
        assert_eq!(plan(5, 0), vec![0..5]);
    }

    #[test]
    fn test_plan_empty() {
        assert!(plan(0, 4).is_empty());
    }

    proptest! {
        #[test]
        fn test_plan_covers_range_exactly_once(len in 1usize..5_000, workers in 0usize..64) {
            let parts = plan(len, workers);

            prop_assert!(!parts.is_empty());
            prop_assert!(parts.len() <= workers.max(1));
            prop_assert_eq!(parts[0].start, 0);
            prop_assert_eq!(parts[parts.len() - 1].end, len);
            for pair in parts.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for part in &parts {
                prop_assert!(part.start < part.end);
            }
        }
    }
}
