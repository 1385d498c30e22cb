//! Benchmark driver: generate data once, copy it per variant, run each
//! algorithm under the clock, verify, and collect a [`Report`].

pub mod clock;
pub mod data;
pub mod prompt;
pub mod report;
pub mod verify;

use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::{ensure_non_empty, Result};
use crate::reduce::{self, ParallelReducer};
use crate::sort::{self, Mode, OddEvenOptions, SortAlgorithm};

pub use clock::{measure, measure_mean, Clock, MonotonicClock};
pub use data::random_array;
pub use report::{
    speedup, ParallelSortRun, ReductionKind, ReductionReport, ReductionRow, ReductionValue, Report, SortRow,
};
pub use verify::{is_permutation, is_sorted, Verification};

/// Inputs at or below this length are echoed in reports.
pub const SAMPLE_LIMIT: usize = 20;

/// Times sum, average and min/max both ways on `data`.
pub fn run_reductions<C: Clock + ?Sized>(
    data: &[i32],
    runs: usize,
    reducer: ParallelReducer,
    clock: &C,
) -> Result<ReductionReport> {
    ensure_non_empty(data)?;

    let (seq_sum, t_seq_sum) = measure_mean(clock, runs, || reduce::sum(data));
    let (par_sum, t_par_sum) = measure_mean(clock, runs, || reducer.sum(data));

    let (seq_avg, t_seq_avg) = measure_mean(clock, runs, || reduce::average(data));
    let (par_avg, t_par_avg) = measure_mean(clock, runs, || reducer.average(data));

    let (seq_mm, t_seq_mm) = measure_mean(clock, runs, || reduce::min_max(data));
    let (par_mm, t_par_mm) = measure_mean(clock, runs, || reducer.min_max(data));

    let rows = vec![
        ReductionRow::new(
            ReductionKind::Sum,
            ReductionValue::Sum(seq_sum?),
            ReductionValue::Sum(par_sum?),
            t_seq_sum,
            t_par_sum,
        ),
        ReductionRow::new(
            ReductionKind::Average,
            ReductionValue::Average(seq_avg?),
            ReductionValue::Average(par_avg?),
            t_seq_avg,
            t_par_avg,
        ),
        ReductionRow::new(
            ReductionKind::MinMax,
            ReductionValue::MinMax(seq_mm?),
            ReductionValue::MinMax(par_mm?),
            t_seq_mm,
            t_par_mm,
        ),
    ];

    for row in rows.iter().filter(|r| !r.matches) {
        warn!(kind = %row.kind, seq = %row.sequential, par = %row.parallel, "parallel reduction disagrees");
    }

    Ok(ReductionReport {
        size: data.len(),
        runs: runs.max(1),
        sample: (data.len() <= SAMPLE_LIMIT).then(|| data.to_vec()),
        rows,
    })
}

/// Sorts private copies of `original` with one algorithm, sequentially and
/// (when it has one) in parallel, and verifies both outputs.
pub fn run_sort<C: Clock + ?Sized>(
    algorithm: SortAlgorithm,
    original: &[i32],
    odd_even: OddEvenOptions,
    clock: &C,
) -> Result<SortRow> {
    ensure_non_empty(original)?;

    let mut seq = original.to_vec();
    let (seq_stats, seq_time) = measure(clock, || sort::sort(algorithm, Mode::Sequential, &mut seq, odd_even));
    let seq_stats = seq_stats?;
    let seq_verification = Verification::check(original, &seq);

    let (parallel, speedup) = if algorithm.has_parallel_variant() {
        let mut par = original.to_vec();
        let (par_stats, par_time) = measure(clock, || sort::sort(algorithm, Mode::Parallel, &mut par, odd_even));
        let run = ParallelSortRun {
            ms: report::millis(par_time),
            stats: par_stats?,
            verification: Verification::check(original, &par),
            matches_sequential: par == seq,
        };
        (Some(run), speedup(seq_time, par_time))
    } else {
        (None, None)
    };

    let row = SortRow {
        algorithm,
        size: original.len(),
        seq_ms: report::millis(seq_time),
        seq_stats,
        seq_verification,
        parallel,
        speedup,
    };
    if !row.ok() {
        warn!(%algorithm, size = row.size, "sort output failed verification");
    }
    Ok(row)
}

/// Runs every sort on one freshly generated array of length `size`.
pub fn run_sorts<C: Clock + ?Sized>(size: usize, config: &BenchConfig, clock: &C) -> Result<Vec<SortRow>> {
    let original = random_array(size, config.sort_value_range(), config.seed);
    info!(size, "running sort comparison");

    SortAlgorithm::ALL
        .into_iter()
        .map(|algorithm| run_sort(algorithm, &original, config.odd_even_options(), clock))
        .collect()
}

/// Generates the reduction input for `size` and measures it.
pub fn reduction_report<C: Clock + ?Sized>(size: usize, config: &BenchConfig, clock: &C) -> Result<ReductionReport> {
    let data = random_array(size, config.value_range(), config.seed);
    info!(size, runs = config.runs, merge = ?config.merge, "running reduction comparison");
    run_reductions(&data, config.runs, ParallelReducer::new().merge(config.merge), clock)
}

#[cfg(test)]
mod tests {
    use super::clock::fake::SteppingClock;
    use super::*;
    use crate::error::BenchError;
    use crate::reduce::{Extremum, MergeStrategy};
    use std::time::Duration;

    #[test]
    fn test_reductions_on_known_array() {
        let clock = SteppingClock::new(Duration::from_micros(10));
        let report = run_reductions(&[5, 3, 8, 1, 9, 2], 3, ParallelReducer::new().workers(4), &clock).unwrap();

        assert_eq!(report.size, 6);
        assert_eq!(report.runs, 3);
        assert_eq!(report.sample, Some(vec![5, 3, 8, 1, 9, 2]));
        assert!(report.rows.iter().all(|r| r.matches));
        assert_eq!(report.rows[0].sequential, ReductionValue::Sum(28));
        match report.rows[2].parallel {
            ReductionValue::MinMax(mm) => {
                assert_eq!(mm.min, Extremum::new(1, 3));
                assert_eq!(mm.max, Extremum::new(9, 4));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_large_input_is_not_echoed() {
        let clock = MonotonicClock::new();
        let data = vec![1; SAMPLE_LIMIT + 1];
        let reducer = ParallelReducer::new().merge(MergeStrategy::Critical);
        let report = run_reductions(&data, 1, reducer, &clock).unwrap();
        assert!(report.sample.is_none());
    }

    #[test]
    fn test_sort_rows_verify_and_skip_parallel_insertion() {
        let clock = SteppingClock::new(Duration::from_millis(1));
        let original = [9, 4, 7, 1, 4, 0];

        for algorithm in SortAlgorithm::ALL {
            let row = run_sort(algorithm, &original, OddEvenOptions::default(), &clock).unwrap();
            assert!(row.ok(), "{algorithm}");
            assert_eq!(row.parallel.is_some(), algorithm.has_parallel_variant());
            assert_eq!(row.speedup.is_some(), algorithm.has_parallel_variant());
        }
    }

    #[test]
    fn test_run_sorts_covers_all_algorithms() {
        let config = BenchConfig {
            seed: Some(1),
            ..BenchConfig::default()
        };
        let rows = run_sorts(50, &config, &MonotonicClock::new()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(SortRow::ok));
    }

    #[test]
    fn test_empty_input_rejected_before_running() {
        let clock = MonotonicClock::new();
        assert!(matches!(
            run_reductions(&[], 1, ParallelReducer::new(), &clock),
            Err(BenchError::InvalidSize { .. })
        ));
        assert!(matches!(
            run_sort(SortAlgorithm::Bubble, &[], OddEvenOptions::default(), &clock),
            Err(BenchError::InvalidSize { .. })
        ));
    }
}
