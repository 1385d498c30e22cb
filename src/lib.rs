//! Sequential vs fork-join parallel array algorithms.
//!
//! Reductions (sum, average, min/max with position) and in-place comparison
//! sorts (bubble, selection, insertion) over `i32` arrays, each with a
//! parallel counterpart that must agree exactly with the sequential one,
//! plus the timing and verification harness that compares them.

pub mod bench;
pub mod config;
pub mod error;
pub mod partition;
pub mod reduce;
pub mod sort;

pub use config::BenchConfig;
pub use error::{validate_size, BenchError, Result};
pub use reduce::{Extremum, MergeStrategy, MinMax, ParallelReducer};
pub use sort::{Mode, OddEvenMode, OddEvenOptions, SortAlgorithm, SortStats};
