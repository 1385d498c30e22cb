use crate::error::{ensure_non_empty, BenchError, Result};

use super::combine::MinMax;

/// Single-pass sum with 64-bit accumulation.
pub(crate) fn sum_scan(data: &[i32]) -> i64 {
    let mut sum = 0i64;
    for &x in data {
        sum += i64::from(x);
    }
    sum
}

/// Single-pass min/max; `offset` is the global index of `data[0]`.
///
/// Strict comparisons keep the first position of a repeated extremum.
/// Panics on an empty slice, callers check first.
pub(crate) fn min_max_scan(data: &[i32], offset: usize) -> MinMax {
    let mut acc = MinMax::at(data[0], offset);
    for (i, &x) in data.iter().enumerate().skip(1) {
        if x < acc.min.value {
            acc.min.value = x;
            acc.min.index = offset + i;
        }
        if x > acc.max.value {
            acc.max.value = x;
            acc.max.index = offset + i;
        }
    }
    acc
}

pub fn sum(data: &[i32]) -> Result<i64> {
    ensure_non_empty(data)?;
    Ok(sum_scan(data))
}

pub fn average(data: &[i32]) -> Result<f64> {
    if data.is_empty() {
        return Err(BenchError::DivisionByZero);
    }
    Ok(sum_scan(data) as f64 / data.len() as f64)
}

pub fn min_max(data: &[i32]) -> Result<MinMax> {
    ensure_non_empty(data)?;
    Ok(min_max_scan(data, 0))
}
