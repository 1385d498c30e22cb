//! Sum, average and min/max reductions, sequential and fork-join.

pub mod combine;
pub mod parallel;
pub mod sequential;

pub use combine::{combine_max, combine_min, Extremum, MinMax, MinMaxReducer, Reducer, SumReducer};
pub use parallel::{par_average, par_min_max, par_sum, reduce_partitioned, MergeStrategy, ParallelReducer};
pub use sequential::{average, min_max, sum};
