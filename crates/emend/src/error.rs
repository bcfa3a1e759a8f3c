//! Error types for the Emend library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Emend operations.
#[derive(Debug, Error)]
pub enum EmendError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A suggestion, batch, or snapshot id that is not known.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Two suggestion spans in one batch overlap.
    #[error(
        "Overlapping suggestions: #{first} [{first_start}, {first_end}) overlaps #{second} starting at {second_start}"
    )]
    Overlap {
        first: u32,
        first_start: usize,
        first_end: usize,
        second: u32,
        second_start: usize,
    },

    /// A span that does not fit the text it is applied to.
    #[error("Invalid span for suggestion #{id}: [{start}, {end}) in text of {len} bytes")]
    InvalidSpan {
        id: u32,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure saving or loading review state.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for Emend operations.
pub type Result<T> = std::result::Result<T, EmendError>;
