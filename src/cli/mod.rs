//! CLI for pricedesk
//!
//! Commands:
//! - validate: load a CSV, run validation, print a summary
//! - report: load a CSV and write the text report file
//! - serve: start the REST server, optionally preloading a CSV

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, Config};
pub use errors::{CliError, CliResult};
