//! Odd-even transposition sort.
//!
//! Phase `k` compares the disjoint pairs starting at index `k % 2`, so every
//! comparison in a phase can run on a different worker. Phases are separated
//! by a full barrier: either the implicit join at the end of a rayon call
//! (`Phases`) or an explicit `std::sync::Barrier` shared by long-lived scoped
//! workers (`Barrier`).

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Barrier;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_non_empty, BenchError, Result};
use crate::partition::{plan, runtime_workers};

use super::SortStats;

/// Which synchronisation scheme separates phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddEvenMode {
    /// One rayon fork-join per phase.
    #[default]
    Phases,
    /// One scoped thread per worker for the whole sort, phases gated by a `Barrier`.
    Barrier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OddEvenOptions {
    pub mode: OddEvenMode,
    /// Stop once an even and an odd phase in a row make no swaps.
    /// Off by default: the classic formulation always runs `n` phases.
    pub early_exit: bool,
    /// Number of pair groups per phase. `None` uses the runtime's thread count.
    pub workers: Option<usize>,
}

pub fn odd_even_sort(data: &mut [i32]) -> Result<SortStats> {
    odd_even_sort_with(data, OddEvenOptions::default())
}

pub fn odd_even_sort_with(data: &mut [i32], opts: OddEvenOptions) -> Result<SortStats> {
    ensure_non_empty(data)?;

    let workers = opts.workers.unwrap_or_else(runtime_workers).max(1);
    let stats = match opts.mode {
        OddEvenMode::Phases => sort_phases(data, workers, opts.early_exit),
        OddEvenMode::Barrier => sort_barrier(data, workers, opts.early_exit)?,
    };
    debug!(
        len = data.len(),
        workers,
        mode = ?opts.mode,
        phases = stats.passes,
        swaps = stats.swaps,
        "odd-even sort finished"
    );
    Ok(stats)
}

/// Pairs compared in `phase` for an array of length `n`.
fn pairs_in_phase(n: usize, phase: usize) -> usize {
    n.saturating_sub(phase % 2) / 2
}

fn compare_swap(pair: &mut [i32]) -> bool {
    if pair[0] > pair[1] {
        pair.swap(0, 1);
        true
    } else {
        false
    }
}

fn sort_phases(data: &mut [i32], workers: usize, early_exit: bool) -> SortStats {
    let n = data.len();
    let mut stats = SortStats::default();
    let mut previous_clean = false;

    for phase in 0..n {
        let start = phase % 2;
        let pairs = pairs_in_phase(n, phase);
        if pairs == 0 {
            stats.passes += 1;
            continue;
        }

        // Chunks hold whole pairs so no pair straddles two workers.
        let chunk = 2 * pairs.div_ceil(workers);
        let swaps: usize = data[start..]
            .par_chunks_mut(chunk)
            .map(|block| block.chunks_exact_mut(2).map(compare_swap).filter(|&swapped| swapped).count())
            .sum();

        stats.passes += 1;
        stats.swaps += swaps;

        if early_exit {
            let clean = swaps == 0;
            if clean && previous_clean {
                break;
            }
            previous_clean = clean;
        }
    }
    stats
}

fn sort_barrier(data: &mut [i32], workers: usize, early_exit: bool) -> Result<SortStats> {
    let n = data.len();
    // More workers than pairs would only add barrier traffic.
    let workers = workers.min((n / 2).max(1));

    let cells: Vec<AtomicI32> = data.iter().map(|&x| AtomicI32::new(x)).collect();
    let phase_swaps: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
    let barrier = Barrier::new(workers);

    let phases_run = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let cells = &cells;
                let phase_swaps = &phase_swaps;
                let barrier = &barrier;
                s.spawn(move |_| barrier_worker(worker, workers, cells, phase_swaps, barrier, early_exit))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<std::thread::Result<Vec<usize>>>()
    })
    .and_then(|joined| joined)
    .map_err(|_| BenchError::ThreadPool("odd-even worker panicked".to_string()))?
    .into_iter()
    .max()
    .unwrap_or(0);

    for (slot, cell) in data.iter_mut().zip(cells) {
        *slot = cell.into_inner();
    }

    Ok(SortStats {
        passes: phases_run,
        swaps: phase_swaps.into_iter().map(AtomicUsize::into_inner).sum(),
    })
}

/// Body of one long-lived worker. Returns the number of phases executed.
///
/// Within a phase each worker touches only the cells of its own pairs, and
/// the barrier orders every phase's stores before the next phase's loads, so
/// relaxed atomics are sufficient.
fn barrier_worker(
    worker: usize,
    workers: usize,
    cells: &[AtomicI32],
    phase_swaps: &[AtomicUsize],
    barrier: &Barrier,
    early_exit: bool,
) -> usize {
    let n = cells.len();

    for phase in 0..n {
        let start = phase % 2;
        let groups = plan(pairs_in_phase(n, phase), workers);

        if let Some(mine) = groups.get(worker) {
            let mut local = 0;
            for k in mine.clone() {
                let i = start + 2 * k;
                let a = cells[i].load(Ordering::Relaxed);
                let b = cells[i + 1].load(Ordering::Relaxed);
                if a > b {
                    cells[i].store(b, Ordering::Relaxed);
                    cells[i + 1].store(a, Ordering::Relaxed);
                    local += 1;
                }
            }
            phase_swaps[phase].fetch_add(local, Ordering::Relaxed);
        }

        barrier.wait();

        // Both counters are final here and never written again, so every
        // worker reaches the same decision.
        if early_exit
            && phase > 0
            && phase_swaps[phase].load(Ordering::Relaxed) == 0
            && phase_swaps[phase - 1].load(Ordering::Relaxed) == 0
        {
            return phase + 1;
        }
    }
    n
}
