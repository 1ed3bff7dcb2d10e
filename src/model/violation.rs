//! Rule violation taxonomy
//!
//! Violations are data states, not errors: they accumulate on a record during
//! validation and never abort processing. Each variant carries whatever detail
//! its phrase needs; `Display` renders the exact phrase shown to operators in
//! reports and API responses.

use std::fmt;

/// A single rule violation attached to a pricing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Price column was empty and no token was captured.
    MissingPrice,
    /// A price token existed but failed numeric parse; the token is kept
    /// verbatim for display.
    InvalidPriceFormat { token: String },
    /// Price parsed but is below zero.
    NegativePrice,
    /// Price parsed but is exactly zero.
    ZeroPrice,
    /// Exchange column absent or blank.
    MissingExchange,
    /// Exchange present but not in the recognized set.
    InvalidExchange { value: String },
    /// Product type column absent or blank.
    MissingProductType,
    /// Product type present but not in the recognized set.
    InvalidProductType { value: String },
    /// Instrument GUID absent or blank; the GUID is the intended primary key.
    MissingGuid,
    /// Trade date absent or unparseable at ingest.
    MissingTradeDate,
    /// A record earlier in storage order already holds this GUID.
    DuplicateGuid,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingPrice => write!(f, "Missing price value"),
            Violation::InvalidPriceFormat { token } => {
                write!(f, "Invalid price format: {}", token)
            }
            Violation::NegativePrice => write!(f, "Negative price"),
            Violation::ZeroPrice => write!(f, "Zero price"),
            Violation::MissingExchange => write!(f, "Missing exchange"),
            Violation::InvalidExchange { value } => write!(f, "Invalid exchange: {}", value),
            Violation::MissingProductType => write!(f, "Missing product type"),
            Violation::InvalidProductType { value } => {
                write!(f, "Invalid product type: {}", value)
            }
            Violation::MissingGuid => {
                write!(f, "Missing instrument GUID (primary key required)")
            }
            Violation::MissingTradeDate => write!(f, "Missing trade date"),
            Violation::DuplicateGuid => write!(f, "Duplicate GUID (primary key violation)"),
        }
    }
}
