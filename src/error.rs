use std::path::PathBuf;

use thiserror::Error;

use crate::sort::SortAlgorithm;

/// Errors surfaced by the reduction and sorting entry points and the driver.
///
/// Every variant is a precondition or environment failure: nothing here is
/// retried and no partial result accompanies an error.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid size: {requested} (array length must be a positive integer)")]
    InvalidSize { requested: i64 },

    #[error("Invalid size: '{0}' is not an integer")]
    UnparsableSize(String),

    #[error("Division by zero: cannot average an empty array")]
    DivisionByZero,

    #[error("{algorithm} sort has no parallel variant")]
    NotParallelizable { algorithm: SortAlgorithm },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    pub fn invalid_size(requested: impl TryInto<i64>) -> Self {
        Self::InvalidSize {
            requested: requested.try_into().unwrap_or(i64::MAX),
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;

/// Rejects empty input before any algorithm runs.
pub(crate) fn ensure_non_empty(data: &[i32]) -> Result<()> {
    if data.is_empty() {
        return Err(BenchError::invalid_size(0));
    }
    Ok(())
}

/// Validates a user-supplied array length.
///
/// Accepts signed input so that `0` and negative requests from the prompt
/// map onto [`BenchError::InvalidSize`] instead of a parse failure.
pub fn validate_size(requested: i64) -> Result<usize> {
    if requested <= 0 {
        return Err(BenchError::InvalidSize { requested });
    }
    usize::try_from(requested).map_err(|_| BenchError::InvalidSize { requested })
}
