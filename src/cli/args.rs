//! CLI argument definitions using clap
//!
//! Commands:
//! - pricedesk validate --file <prices.csv>
//! - pricedesk report --file <prices.csv> --output <report.txt>
//! - pricedesk serve [--config <path>] [--bind <addr>] [--file <prices.csv>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pricedesk - Pricing data validation and reporting service
#[derive(Parser, Debug)]
#[command(name = "pricedesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and validate a pricing CSV, printing a summary
    Validate {
        /// Path to the pricing CSV file
        #[arg(long)]
        file: PathBuf,

        /// Also write the text report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Load a pricing CSV and write the text report file
    Report {
        /// Path to the pricing CSV file
        #[arg(long)]
        file: PathBuf,

        /// Report output path
        #[arg(long, default_value = "report.txt")]
        output: PathBuf,
    },

    /// Start the REST API server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bind address, overrides the configuration file
        #[arg(long)]
        bind: Option<String>,

        /// CSV file to preload before serving
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
