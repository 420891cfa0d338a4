//! Error types for input validation and data loading
//!
//! The projection core never fails. These errors are raised at the entry points
//! that accept caller data (baseline vectors, parameter bundles, files on disk)
//! before any engine arithmetic runs.

use crate::population::Sex;

/// Errors surfaced before a projection runs
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// A baseline vector did not have exactly one bucket per age 0..=100
    #[error("{sex:?} population has {len} age buckets, expected {expected}")]
    BucketCount {
        sex: Sex,
        len: usize,
        expected: usize,
    },

    /// A cohort value was negative
    #[error("{sex:?} cohort at age {age} is negative ({value})")]
    NegativeCohort { sex: Sex, age: usize, value: f64 },

    /// A cohort value was NaN or infinite
    #[error("{sex:?} cohort at age {age} is not finite")]
    NonFiniteCohort { sex: Sex, age: usize },

    /// A scalar parameter was outside its domain
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// No country profile with the requested code
    #[error("unknown country code: {0}")]
    UnknownCountry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
