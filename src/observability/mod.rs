//! Observability for pricedesk
//!
//! Structured JSON logging with deterministic key ordering. Logging is
//! synchronous and read-only with respect to record state; a log failure must
//! never affect an operation's outcome.

mod logger;

pub use logger::{Logger, Severity};
