use crate::error::{ensure_non_empty, Result};

use super::SortStats;

/// Bubble sort with early exit once a full pass makes no swaps.
pub fn bubble_sort(data: &mut [i32]) -> Result<SortStats> {
    ensure_non_empty(data)?;

    let n = data.len();
    let mut stats = SortStats::default();
    for i in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                stats.swaps += 1;
                swapped = true;
            }
        }
        stats.passes += 1;
        if !swapped {
            break;
        }
    }
    Ok(stats)
}

/// Selection sort: position `i` receives the first minimum of `[i, n)`.
pub fn selection_sort(data: &mut [i32]) -> Result<SortStats> {
    ensure_non_empty(data)?;

    let n = data.len();
    let mut stats = SortStats::default();
    for i in 0..n - 1 {
        let mut min_idx = i;
        for j in i + 1..n {
            if data[j] < data[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            data.swap(i, min_idx);
            stats.swaps += 1;
        }
        stats.passes += 1;
    }
    Ok(stats)
}

/// Insertion sort. `swaps` counts element shifts.
pub fn insertion_sort(data: &mut [i32]) -> Result<SortStats> {
    ensure_non_empty(data)?;

    let mut stats = SortStats::default();
    for i in 1..data.len() {
        let key = data[i];
        let mut j = i;
        while j > 0 && data[j - 1] > key {
            data[j] = data[j - 1];
            stats.swaps += 1;
            j -= 1;
        }
        data[j] = key;
        stats.passes += 1;
    }
    Ok(stats)
}
