//! Loader error types
//!
//! Only file-level failures surface here. Field-level problems (bad dates,
//! unparseable prices) never abort a load; they are captured on the record
//! and flagged by validation.

use thiserror::Error;

/// Result type for loader operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Hard failures while loading a pricing file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Only `.csv` files are accepted.
    #[error("unsupported file format: '{0}' (expected a .csv file)")]
    UnsupportedFormat(String),

    /// The file could not be read or its CSV structure is broken.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}
