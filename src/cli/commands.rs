//! CLI command implementations

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::model::ValidationReport;
use crate::parser;
use crate::report::write_text_report;
use crate::rest_api::{RestServer, SharedStore};
use crate::store::PricingStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Server configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address for the REST server (optional, default 127.0.0.1:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Default output path for generated text reports
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_report_path() -> String {
    "report.txt".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            report_path: default_report_path(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.bind_addr.parse::<SocketAddr>().map_err(|e| {
            CliError::config_error(format!("Invalid bind_addr '{}': {}", self.bind_addr, e))
        })?;
        if self.report_path.trim().is_empty() {
            return Err(CliError::config_error("report_path must not be empty"));
        }
        Ok(())
    }
}

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    match Cli::parse_args().command {
        Command::Validate { file, report } => validate(&file, report.as_deref()),
        Command::Report { file, output } => report_file(&file, &output),
        Command::Serve { config, bind, file } => serve(config.as_deref(), bind, file.as_deref()),
    }
}

fn load_store(file: &Path) -> CliResult<PricingStore> {
    let records = parser::load_file(file)?;
    let mut store = PricingStore::new();
    store.load(records);
    Ok(store)
}

fn print_summary(report: &ValidationReport) {
    println!("Data loaded and validated successfully!");
    println!();
    println!("Summary:");
    println!("  Total Records: {}", report.total_records);
    println!("  Valid Records: {}", report.valid_records);
    println!("  Invalid Records: {}", report.invalid_records);
    if report.duplicate_records > 0 {
        println!("  Duplicate Records: {}", report.duplicate_records);
    }
    println!("  Missing Values: {}", report.missing_total());
}

fn validate(file: &Path, report_path: Option<&Path>) -> CliResult<()> {
    let store = load_store(file)?;
    print_summary(store.report());

    if let Some(path) = report_path {
        write_text_report(store.report(), path)
            .map_err(|e| CliError::report_failed(format!("{}: {}", path.display(), e)))?;
        println!();
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn report_file(file: &Path, output: &Path) -> CliResult<()> {
    let store = load_store(file)?;
    write_text_report(store.report(), output)
        .map_err(|e| CliError::report_failed(format!("{}: {}", output.display(), e)))?;
    print_summary(store.report());
    println!();
    println!("Report written to {}", output.display());
    Ok(())
}

fn serve(config_path: Option<&Path>, bind: Option<String>, file: Option<&Path>) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    config.validate()?;

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .map_err(|e| CliError::config_error(format!("Invalid bind_addr: {}", e)))?;

    let store: SharedStore = Arc::new(RwLock::new(PricingStore::new()));
    if let Some(file) = file {
        let records = parser::load_file(file)?;
        let mut guard = store
            .write()
            .map_err(|_| CliError::server_failed("store lock poisoned"))?;
        let report = guard.load(records);
        print_summary(report);
        println!();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::server_failed(format!("failed to start runtime: {}", e)))?;

    runtime
        .block_on(RestServer::new(store).serve(addr))
        .map_err(|e| CliError::server_failed(e.to_string()))
}
