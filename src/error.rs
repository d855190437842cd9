//! Error types for the donation analytics engine.
//!
//! Only fatal conditions live here. Per-line validation failures are
//! [`Rejection`](crate::record::Rejection)s and never abort a run.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that abort a run before any output is written.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open, read or write one of the files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure reported by the delimited-record reader
    #[error("Input read error: {0}")]
    Csv(#[from] csv::Error),

    /// Percentile file content is not a number in `[0, 100]`
    #[error("Invalid percentile '{value}': {reason}")]
    InvalidPercentile { value: String, reason: String },

    /// Missing positional arguments
    #[error(
        "Missing arguments. Usage: donation-analytics <percentile.txt> <itcont.txt> <repeat_donors.txt>"
    )]
    MissingArgument,
}
