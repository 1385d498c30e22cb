//! Fork-join reductions.
//!
//! The array is split into contiguous partitions (one per worker), each
//! partition is folded with the sequential scan, and the partials are merged
//! either pairwise by rayon (`Tree`) or into one shared accumulator under a
//! lock (`Critical`). The input is only ever borrowed immutably.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_non_empty, BenchError, Result};
use crate::partition::{plan, runtime_workers};

use super::combine::{MinMax, MinMaxReducer, Reducer, SumReducer};

/// How worker partials are merged into the global result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Pairwise merge performed by the join tree.
    #[default]
    Tree,
    /// Each worker merges its local accumulator into a mutex-guarded global.
    Critical,
}

/// Runs `reducer` over `data` split into `workers` partitions.
pub fn reduce_partitioned<R: Reducer>(
    data: &[i32],
    workers: usize,
    merge: MergeStrategy,
    reducer: &R,
) -> Result<R::Output> {
    ensure_non_empty(data)?;

    let parts = plan(data.len(), workers);
    debug!(len = data.len(), partitions = parts.len(), ?merge, "parallel reduction");

    let merged = match merge {
        MergeStrategy::Tree => parts
            .par_iter()
            .map(|p| reducer.fold(&data[p.clone()], p.start))
            .reduce_with(|a, b| reducer.combine(a, b)),
        MergeStrategy::Critical => {
            let global: Mutex<Option<R::Output>> = Mutex::new(None);
            parts.par_iter().for_each(|p| {
                let local = reducer.fold(&data[p.clone()], p.start);
                let mut guard = global.lock().unwrap_or_else(PoisonError::into_inner);
                *guard = Some(match guard.take() {
                    Some(acc) => reducer.combine(acc, local),
                    None => local,
                });
            });
            global.into_inner().unwrap_or_else(PoisonError::into_inner)
        }
    };

    merged.ok_or_else(|| BenchError::invalid_size(0))
}

/// Parallel reduction entry points.
///
/// ```ignore
/// let reducer = ParallelReducer::new().workers(4).merge(MergeStrategy::Critical);
/// assert_eq!(reducer.sum(&[5, 3, 8, 1, 9, 2])?, 28);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelReducer {
    workers: Option<usize>,
    merge: MergeStrategy,
}

impl ParallelReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the partition count. Without this the runtime's thread count is used.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(runtime_workers)
    }

    pub fn sum(&self, data: &[i32]) -> Result<i64> {
        reduce_partitioned(data, self.worker_count(), self.merge, &SumReducer)
    }

    pub fn average(&self, data: &[i32]) -> Result<f64> {
        if data.is_empty() {
            return Err(BenchError::DivisionByZero);
        }
        Ok(self.sum(data)? as f64 / data.len() as f64)
    }

    pub fn min_max(&self, data: &[i32]) -> Result<MinMax> {
        reduce_partitioned(data, self.worker_count(), self.merge, &MinMaxReducer)
    }
}

pub fn par_sum(data: &[i32]) -> Result<i64> {
    ParallelReducer::new().sum(data)
}

pub fn par_average(data: &[i32]) -> Result<f64> {
    ParallelReducer::new().average(data)
}

pub fn par_min_max(data: &[i32]) -> Result<MinMax> {
    ParallelReducer::new().min_max(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{sequential, Extremum};
    use proptest::prelude::*;

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_par_sum_matches_known_value() {
        let data = [5, 3, 8, 1, 9, 2];
        for workers in 1..=8 {
            for merge in [MergeStrategy::Tree, MergeStrategy::Critical] {
                let reducer = ParallelReducer::new().workers(workers).merge(merge);
                assert_eq!(reducer.sum(&data).unwrap(), 28);
            }
        }
        let avg = par_average(&data).unwrap();
        assert!((avg - 28.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_par_min_max_with_positions() {
        let mm = ParallelReducer::new().workers(3).min_max(&[3, 1, 2]).unwrap();
        assert_eq!(mm.min, Extremum::new(1, 1));
        assert_eq!(mm.max, Extremum::new(3, 0));
    }

    #[test]
    fn test_ties_resolve_to_leftmost_across_partitions() {
        // Every partition sees the same min and max; only the first may win.
        let data: Vec<i32> = (0..1000).map(|i| if i % 2 == 0 { 1 } else { 9 }).collect();
        for workers in [1, 2, 3, 7, 16, 1000] {
            for merge in [MergeStrategy::Tree, MergeStrategy::Critical] {
                let mm = ParallelReducer::new()
                    .workers(workers)
                    .merge(merge)
                    .min_max(&data)
                    .unwrap();
                assert_eq!(mm.min, Extremum::new(1, 0));
                assert_eq!(mm.max, Extremum::new(9, 1));
            }
        }
    }

    #[test]
    fn test_runtime_pool_size_does_not_change_result() {
        let data: Vec<i32> = (0..10_000).map(|i| (i * 7919 % 101) - 50).collect();
        let expected_sum = sequential::sum(&data).unwrap();
        let expected_mm = sequential::min_max(&data).unwrap();

        for threads in [1, 2, 4, 8] {
            let (s, mm) = pool(threads).install(|| (par_sum(&data).unwrap(), par_min_max(&data).unwrap()));
            assert_eq!(s, expected_sum);
            assert_eq!(mm, expected_mm);
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(par_sum(&[]), Err(BenchError::InvalidSize { .. })));
        assert!(matches!(par_min_max(&[]), Err(BenchError::InvalidSize { .. })));
        assert!(matches!(par_average(&[]), Err(BenchError::DivisionByZero)));
    }

    proptest! {
        #[test]
        fn test_reduction_is_independent_of_worker_count(
            data in prop::collection::vec(-1_000i32..1_000, 1..500),
            w1 in 1usize..32,
            w2 in 1usize..32,
        ) {
            let seq_sum = sequential::sum(&data).unwrap();
            let seq_mm = sequential::min_max(&data).unwrap();

            let a = ParallelReducer::new().workers(w1);
            let b = ParallelReducer::new().workers(w2).merge(MergeStrategy::Critical);

            prop_assert_eq!(a.sum(&data).unwrap(), seq_sum);
            prop_assert_eq!(b.sum(&data).unwrap(), seq_sum);
            prop_assert_eq!(a.min_max(&data).unwrap(), seq_mm);
            prop_assert_eq!(b.min_max(&data).unwrap(), seq_mm);
        }
    }
}
