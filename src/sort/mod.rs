//! In-place comparison sorts and their parallel variants.
//!
//! | algorithm | sequential | parallel                              |
//! |-----------|------------|---------------------------------------|
//! | bubble    | early exit | odd-even transposition                |
//! | selection | yes        | sequential outer loop, parallel min   |
//! | insertion | yes        | none: each step needs the sorted prefix |

pub mod odd_even;
pub mod selection;
pub mod sequential;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

pub use odd_even::{odd_even_sort, odd_even_sort_with, OddEvenMode, OddEvenOptions};
pub use selection::{par_min_from, par_selection_sort};
pub use sequential::{bubble_sort, insertion_sort, selection_sort};

/// Work counters reported by every sort.
///
/// `passes` is outer iterations (phases for odd-even); `swaps` is exchanges,
/// or element shifts for insertion sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    pub passes: usize,
    pub swaps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [Self::Bubble, Self::Selection, Self::Insertion];

    pub fn has_parallel_variant(self) -> bool {
        !matches!(self, Self::Insertion)
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sequential,
    Parallel,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sequential => "seq",
            Self::Parallel => "par",
        })
    }
}

/// Sorts `data` with the requested algorithm and mode.
///
/// A parallel insertion sort request is refused with
/// [`BenchError::NotParallelizable`] rather than silently run sequentially.
pub fn sort(algorithm: SortAlgorithm, mode: Mode, data: &mut [i32], odd_even: OddEvenOptions) -> Result<SortStats> {
    match (algorithm, mode) {
        (SortAlgorithm::Bubble, Mode::Sequential) => bubble_sort(data),
        (SortAlgorithm::Bubble, Mode::Parallel) => odd_even_sort_with(data, odd_even),
        (SortAlgorithm::Selection, Mode::Sequential) => selection_sort(data),
        (SortAlgorithm::Selection, Mode::Parallel) => par_selection_sort(data),
        (SortAlgorithm::Insertion, Mode::Sequential) => insertion_sort(data),
        (SortAlgorithm::Insertion, Mode::Parallel) => Err(BenchError::NotParallelizable { algorithm }),
    }
}
