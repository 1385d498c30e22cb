//! Selection sort with a parallel minimum search.
//!
//! The outer loop stays sequential: the swap at position `i` decides what the
//! search at `i + 1` sees. Only the scan of `[i + 1, n)` is split across
//! workers, merged with [`combine_min`] so the chosen index is the same one
//! the sequential scan would pick.

use rayon::prelude::*;

use crate::error::{ensure_non_empty, Result};
use crate::reduce::{combine_min, Extremum};

use super::SortStats;

/// Below this many candidates a rayon task is not split further.
const SEARCH_GRAIN: usize = 4096;

/// First position of the minimum of `data[from..]`, seeded with `data[from]`.
pub fn par_min_from(data: &[i32], from: usize) -> Extremum {
    let seed = Extremum::new(data[from], from);
    data[from + 1..]
        .par_iter()
        .enumerate()
        .with_min_len(SEARCH_GRAIN)
        .map(|(k, &value)| Extremum::new(value, from + 1 + k))
        // The seed is idempotent under combine_min, so it can start every split.
        .reduce(|| seed, combine_min)
}

pub fn par_selection_sort(data: &mut [i32]) -> Result<SortStats> {
    ensure_non_empty(data)?;

    let mut stats = SortStats::default();
    for i in 0..data.len() - 1 {
        let best = par_min_from(data, i);
        if best.index != i {
            data.swap(i, best.index);
            stats.swaps += 1;
        }
        stats.passes += 1;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::sequential::selection_sort;
    use proptest::prelude::*;

    #[test]
    fn test_small_array() {
        let mut data = [3, 1, 2];
        par_selection_sort(&mut data).unwrap();
        assert_eq!(data, [1, 2, 3]);
    }

    #[test]
    fn test_min_search_picks_first_occurrence() {
        let mut data = vec![5; 10_000];
        data[6_000] = 1;
        data[9_000] = 1;
        data[7_500] = 1;
        assert_eq!(par_min_from(&data, 0), Extremum::new(1, 6_000));
        assert_eq!(par_min_from(&data, 6_001), Extremum::new(1, 7_500));
        assert_eq!(par_min_from(&data, 9_999), Extremum::new(5, 9_999));
    }

    #[test]
    fn test_large_input_across_pool_sizes() {
        let original: Vec<i32> = (0..3_000).map(|i| (i * 7_919) % 1_000).collect();
        let mut expected = original.clone();
        expected.sort_unstable();

        for threads in [1, 2, 4] {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
            let mut data = original.clone();
            pool.install(|| par_selection_sort(&mut data)).unwrap();
            assert_eq!(data, expected);
        }
    }

    proptest! {
        #[test]
        fn test_same_swaps_as_sequential(data in prop::collection::vec(-30i32..30, 1..150)) {
            let mut seq = data.clone();
            let mut par = data;
            let seq_stats = selection_sort(&mut seq).unwrap();
            let par_stats = par_selection_sort(&mut par).unwrap();

            prop_assert_eq!(seq_stats, par_stats);
            prop_assert_eq!(seq, par);
        }
    }
}
