//! Partial-result combinators.
//!
//! Each combinator is a pure function over two partial results. They are
//! associative and commutative, so the merged value does not depend on how
//! the array was partitioned or in which order workers finish.

use std::cmp::Ordering;

use serde::Serialize;

use super::sequential::{min_max_scan, sum_scan};

/// A value together with its position in the full array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extremum {
    pub value: i32,
    pub index: usize,
}

impl Extremum {
    pub fn new(value: i32, index: usize) -> Self {
        Self { value, index }
    }
}

/// Picks the smaller value; on equal values the lower index wins.
///
/// Equivalent to taking the minimum under the `(value, index)` lexicographic
/// order, which is what makes it associative and commutative. The result
/// matches a left-to-right scan with a strict `<` test.
pub fn combine_min(a: Extremum, b: Extremum) -> Extremum {
    match b.value.cmp(&a.value) {
        Ordering::Less => b,
        Ordering::Greater => a,
        Ordering::Equal if b.index < a.index => b,
        Ordering::Equal => a,
    }
}

/// Picks the larger value; on equal values the lower index wins.
pub fn combine_max(a: Extremum, b: Extremum) -> Extremum {
    match b.value.cmp(&a.value) {
        Ordering::Greater => b,
        Ordering::Less => a,
        Ordering::Equal if b.index < a.index => b,
        Ordering::Equal => a,
    }
}

/// Minimum and maximum of a range, each with its first position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinMax {
    pub min: Extremum,
    pub max: Extremum,
}

impl MinMax {
    /// Seed accumulator for a scan starting at `index`.
    pub fn at(value: i32, index: usize) -> Self {
        let e = Extremum::new(value, index);
        Self { min: e, max: e }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            min: combine_min(self.min, other.min),
            max: combine_max(self.max, other.max),
        }
    }
}

/// A reduction expressed as a chunk-local fold plus a merge of partials.
///
/// `fold` receives a non-empty contiguous chunk and the chunk's offset in the
/// full array so that index-carrying results refer to global positions.
pub trait Reducer: Sync {
    type Output: Copy + Send;

    fn fold(&self, chunk: &[i32], offset: usize) -> Self::Output;

    fn combine(&self, left: Self::Output, right: Self::Output) -> Self::Output;
}

/// 64-bit integer sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumReducer;

impl Reducer for SumReducer {
    type Output = i64;

    fn fold(&self, chunk: &[i32], _offset: usize) -> i64 {
        sum_scan(chunk)
    }

    fn combine(&self, left: i64, right: i64) -> i64 {
        left + right
    }
}

/// Min and max with leftmost position on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxReducer;

impl Reducer for MinMaxReducer {
    type Output = MinMax;

    fn fold(&self, chunk: &[i32], offset: usize) -> MinMax {
        min_max_scan(chunk, offset)
    }

    fn combine(&self, left: MinMax, right: MinMax) -> MinMax {
        left.combine(right)
    }
}
