//! REST presentation layer
//!
//! Axum server over a shared record store. Handlers translate HTTP requests
//! into store operations and store outcomes back into status codes: data
//! violations stay record state (a load of bad rows is still 200), operation
//! outcomes map to 404 (not found), 409 (ambiguous GUID or rename collision)
//! and 400 (rejected price, malformed request); only loader failures surface
//! as hard errors.

mod errors;
mod response;
mod server;

pub use errors::{RestError, RestResult};
pub use response::{AmbiguousResponse, LoadSummary, MutationResponse, RecordView, ReportView};
pub use server::{RestServer, SharedStore};
