//! Driver settings, loaded from TOML and overridden from the command line.
//!
//! ```toml
//! sizes = [1000, 10000]
//! reduce_size = 1000000
//! runs = 5
//! seed = 123
//! merge = "critical"
//! odd_even = "barrier"
//! early_exit = false
//! ```

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::reduce::MergeStrategy;
use crate::sort::{OddEvenMode, OddEvenOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Array lengths for the sort comparison.
    pub sizes: Vec<usize>,
    /// Array length for the reduction comparison.
    pub reduce_size: usize,
    /// Timed repetitions averaged per reduction.
    pub runs: usize,
    pub seed: Option<u64>,
    /// Inclusive value bounds for reduction input.
    pub value_min: i32,
    pub value_max: i32,
    /// Sort input is drawn from `1..=sort_value_max`.
    pub sort_value_max: i32,
    pub merge: MergeStrategy,
    pub odd_even: OddEvenMode,
    pub early_exit: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1_000, 10_000, 100_000],
            reduce_size: 1_000_000,
            runs: 5,
            seed: None,
            value_min: 1,
            value_max: 100,
            sort_value_max: 100_000,
            merge: MergeStrategy::Tree,
            odd_even: OddEvenMode::Phases,
            early_exit: false,
        }
    }
}

impl BenchConfig {
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|err| BenchError::config(origin, err.to_string()))?;
        config.validate(origin)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| BenchError::config(path, err.to_string()))?;
        Self::from_toml(&text, path)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        if self.runs == 0 {
            return Err(BenchError::config(origin, "runs must be at least 1"));
        }
        if self.value_min > self.value_max {
            return Err(BenchError::config(
                origin,
                format!("value_min ({}) exceeds value_max ({})", self.value_min, self.value_max),
            ));
        }
        if self.sort_value_max < 1 {
            return Err(BenchError::config(origin, "sort_value_max must be positive"));
        }
        if self.reduce_size == 0 || self.sizes.contains(&0) {
            return Err(BenchError::invalid_size(0));
        }
        Ok(())
    }

    pub fn value_range(&self) -> RangeInclusive<i32> {
        self.value_min..=self.value_max
    }

    pub fn sort_value_range(&self) -> RangeInclusive<i32> {
        1..=self.sort_value_max
    }

    pub fn odd_even_options(&self) -> OddEvenOptions {
        OddEvenOptions {
            mode: self.odd_even,
            early_exit: self.early_exit,
            workers: None,
        }
    }
}
