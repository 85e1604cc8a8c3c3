//! Common error types for Pairbook

use thiserror::Error;

/// Common result type for Pairbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the pairing engine and the canonical store
#[derive(Error, Debug)]
pub enum Error {
    /// A range's unused positions split unevenly between the original and
    /// sampled roles. Fatal for the whole build: the plan passed validation
    /// but is geometrically inconsistent, and silently truncating the pair
    /// set would hide the defect.
    #[error(
        "range {start}-{end} cannot be paired: {originals} original vs {samples} sampled positions"
    )]
    RangeParity {
        start: usize,
        end: usize,
        originals: usize,
        samples: usize,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Canonical store file could not be parsed
    #[error("Store parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
