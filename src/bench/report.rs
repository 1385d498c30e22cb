//! Timing results and speedup bookkeeping.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::reduce::MinMax;
use crate::sort::{SortAlgorithm, SortStats};

use super::verify::Verification;

/// `seq / par`, or `None` when the parallel time is too small to divide by.
pub fn speedup(seq: Duration, par: Duration) -> Option<f64> {
    let par = par.as_secs_f64();
    if par > 0.0 {
        Some(seq.as_secs_f64() / par)
    } else {
        None
    }
}

pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionKind {
    Sum,
    Average,
    MinMax,
}

impl fmt::Display for ReductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::MinMax => "min/max",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionValue {
    Sum(i64),
    Average(f64),
    MinMax(MinMax),
}

impl fmt::Display for ReductionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum(s) => write!(f, "{s}"),
            Self::Average(a) => write!(f, "{a:.6}"),
            Self::MinMax(mm) => write!(
                f,
                "min {} @ {}, max {} @ {}",
                mm.min.value, mm.min.index, mm.max.value, mm.max.index
            ),
        }
    }
}

/// One reduction measured both ways on the same data.
#[derive(Debug, Clone, Serialize)]
pub struct ReductionRow {
    pub kind: ReductionKind,
    pub sequential: ReductionValue,
    pub parallel: ReductionValue,
    pub seq_ms: f64,
    pub par_ms: f64,
    pub speedup: Option<f64>,
    pub matches: bool,
}

impl ReductionRow {
    pub fn new(kind: ReductionKind, sequential: ReductionValue, parallel: ReductionValue, seq: Duration, par: Duration) -> Self {
        Self {
            kind,
            matches: sequential == parallel,
            sequential,
            parallel,
            seq_ms: millis(seq),
            par_ms: millis(par),
            speedup: speedup(seq, par),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReductionReport {
    pub size: usize,
    pub runs: usize,
    /// Echo of the input when it is small enough to print.
    pub sample: Option<Vec<i32>>,
    pub rows: Vec<ReductionRow>,
}

/// Parallel side of a sort comparison; absent for insertion sort.
#[derive(Debug, Clone, Serialize)]
pub struct ParallelSortRun {
    pub ms: f64,
    pub stats: SortStats,
    pub verification: Verification,
    pub matches_sequential: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortRow {
    pub algorithm: SortAlgorithm,
    pub size: usize,
    pub seq_ms: f64,
    pub seq_stats: SortStats,
    pub seq_verification: Verification,
    pub parallel: Option<ParallelSortRun>,
    pub speedup: Option<f64>,
}

impl SortRow {
    pub fn ok(&self) -> bool {
        self.seq_verification.ok()
            && self
                .parallel
                .as_ref()
                .map_or(true, |p| p.verification.ok() && p.matches_sequential)
    }
}

/// Everything one driver invocation measured.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub threads: usize,
    pub cpus: usize,
    pub reductions: Option<ReductionReport>,
    pub sorts: Vec<SortRow>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            threads: rayon::current_num_threads(),
            cpus: num_cpus::get(),
            reductions: None,
            sorts: Vec::new(),
        }
    }

    pub fn all_ok(&self) -> bool {
        let reductions_ok = self
            .reductions
            .as_ref()
            .map_or(true, |r| r.rows.iter().all(|row| row.matches));
        reductions_ok && self.sorts.iter().all(SortRow::ok)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup() {
        let s = speedup(Duration::from_millis(90), Duration::from_millis(30)).unwrap();
        assert!((s - 3.0).abs() < 1e-9);
        assert_eq!(speedup(Duration::from_millis(5), Duration::ZERO), None);
    }

    #[test]
    fn test_reduction_row_flags_mismatch() {
        let row = ReductionRow::new(
            ReductionKind::Sum,
            ReductionValue::Sum(28),
            ReductionValue::Sum(27),
            Duration::from_millis(2),
            Duration::from_millis(1),
        );
        assert!(!row.matches);
        assert!((row.seq_ms - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = Report::new();
        report.reductions = Some(ReductionReport {
            size: 1,
            runs: 1,
            sample: Some(vec![4]),
            rows: vec![ReductionRow::new(
                ReductionKind::Average,
                ReductionValue::Average(4.0),
                ReductionValue::Average(4.0),
                Duration::from_micros(10),
                Duration::from_micros(5),
            )],
        });
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["reductions"]["rows"][0]["kind"], "average");
        assert_eq!(value["reductions"]["rows"][0]["parallel"]["average"], 4.0);
        assert!(report.all_ok());
    }
}
