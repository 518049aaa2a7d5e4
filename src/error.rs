//! Typed failures for the sampling core
//!
//! The archive, estimator and sampler report failures through [`DrawError`].
//! Row-level problems found while building an archive are [`ValidationError`]s;
//! those rows are skipped and counted, never fatal on their own.
//!
//! Outer layers (config files, ingestion, export) wrap these in `anyhow`.

use thiserror::Error;

/// Why a raw record (or a scripted candidate) is not a valid draw
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected {expected} values, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("value {raw:?} is not an integer")]
    NotAnInteger { raw: String },

    #[error("value {value} outside range 1..={max}")]
    OutOfRange { value: i64, max: u32 },

    #[error("value {value} appears more than once")]
    Duplicate { value: u32 },
}

/// Fatal conditions surfaced to the caller before or during a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("no valid historical draws ({skipped} input rows skipped)")]
    EmptyArchive { skipped: usize },

    #[error("at least 2 historical draws are required for a sample standard deviation, got {draws}")]
    InsufficientData { draws: usize },

    #[error("invalid sampling configuration: {0}")]
    Configuration(String),

    #[error("candidate source produced an invalid draw: {0}")]
    InvalidCandidate(#[from] ValidationError),
}

impl DrawError {
    /// Build a configuration error from any displayable message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for the sampling core
pub type DrawResult<T> = std::result::Result<T, DrawError>;
