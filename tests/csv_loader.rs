//! CSV Loader Tests
//!
//! Row-level problems become record state; only file-level problems are hard
//! errors. Fixtures are written to temp directories.

use std::fs;
use std::path::PathBuf;

use pricedesk::model::Violation;
use pricedesk::parser::{load_file, ParseError};
use pricedesk::store::PricingStore;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const HEADER: &str = "instrument_guid,trade_date,price,exchange,product_type\n";

fn write_csv(body: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");
    fs::write(&path, format!("{}{}", HEADER, body)).unwrap();
    (dir, path)
}

// =============================================================================
// Row Semantics Tests
// =============================================================================

/// Clean rows parse into fully populated records.
#[test]
fn test_clean_file() {
    let (_dir, path) = write_csv(
        "G-1,2024-03-15,101.25,CME,FUT\n\
         G-2,2024-03-15,99.5,NYMEX,OPT\n",
    );

    let records = load_file(&path).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].guid(), Some("G-1"));
    assert_eq!(records[0].price, Some(101.25));
    assert_eq!(records[1].exchange.as_deref(), Some("NYMEX"));
}

/// An unparseable price token is captured, not dropped, and validation turns
/// it into the invalid-format phrase.
#[test]
fn test_unparseable_price_token_flows_to_validation() {
    let (_dir, path) = write_csv("G-1,2024-03-15,abc,CME,FUT\n");

    let records = load_file(&path).unwrap();
    assert_eq!(records[0].price, None);
    assert_eq!(records[0].original_price_token.as_deref(), Some("abc"));

    let mut store = PricingStore::new();
    store.load(records);

    let record = store.get(0).unwrap();
    assert!(record
        .validation_error()
        .unwrap()
        .contains("Invalid price format: abc"));
    assert_eq!(store.report().invalid_price_format, 1);
    assert_eq!(store.report().missing_price, 0);
}

/// An empty price cell means missing, with no token captured.
#[test]
fn test_empty_price_cell() {
    let (_dir, path) = write_csv("G-1,2024-03-15,,CME,FUT\n");

    let records = load_file(&path).unwrap();
    assert_eq!(records[0].price, None);
    assert_eq!(records[0].original_price_token, None);

    let mut store = PricingStore::new();
    store.load(records);
    assert!(store
        .get(0)
        .unwrap()
        .has_violation(&Violation::MissingPrice));
}

/// Unparseable dates are left absent; the row itself survives.
#[test]
fn test_bad_date_keeps_row() {
    let (_dir, path) = write_csv("G-1,03/15/2024,5.0,CME,FUT\n");

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trade_date, None);
}

/// Rows with fewer than five columns are skipped entirely.
#[test]
fn test_short_rows_skipped() {
    let (_dir, path) = write_csv(
        "G-1,2024-03-15\n\
         G-2,2024-03-15,5.0,CME,FUT\n",
    );

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].guid(), Some("G-2"));
}

/// Tokens are trimmed on ingest.
#[test]
fn test_tokens_trimmed() {
    let (_dir, path) = write_csv(" G-1 , 2024-03-15 , 7.5 , CME , FUT \n");

    let records = load_file(&path).unwrap();
    let record = &records[0];
    assert_eq!(record.guid(), Some("G-1"));
    assert_eq!(record.price, Some(7.5));
    assert_eq!(record.exchange.as_deref(), Some("CME"));
}

/// An empty data section yields an empty, loadable batch.
#[test]
fn test_header_only_file() {
    let (_dir, path) = write_csv("");

    let records = load_file(&path).unwrap();
    assert!(records.is_empty());

    let mut store = PricingStore::new();
    store.load(records);
    assert_eq!(store.report().total_records, 0);
}

// =============================================================================
// File-Level Error Tests
// =============================================================================

/// Wrong extension is refused before any I/O.
#[test]
fn test_non_csv_extension_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.txt");
    fs::write(&path, "irrelevant").unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedFormat(_)));
}

/// A missing file is a hard error, not an empty batch.
#[test]
fn test_missing_file_is_hard_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.csv");

    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, ParseError::Csv(_)));
}

// =============================================================================
// End-to-End Test
// =============================================================================

/// Load a mixed file and check the derived report in one pass.
#[test]
fn test_load_to_report_pipeline() {
    let (_dir, path) = write_csv(
        "10,2024-03-15,101.25,CME,FUT\n\
         2,2024-03-15,abc,cme,opt\n\
         ,2024-03-15,50.0,NYSE,FUT\n\
         10,2024-03-16,99.0,COMEX,OPT\n",
    );

    let mut store = PricingStore::new();
    store.load(load_file(&path).unwrap());
    let report = store.report();

    assert_eq!(report.total_records, 4);
    assert_eq!(report.valid_records, 1);
    assert_eq!(report.invalid_price_format, 1);
    assert_eq!(report.missing_instrument_guid, 1);
    assert_eq!(report.invalid_exchange, 1);
    assert_eq!(report.duplicate_records, 1);

    // Display order: 2, 10, hole at index 2, then the duplicate 10
    let sorted = store.get_all_sorted();
    assert_eq!(sorted[0].guid(), Some("2"));
    assert_eq!(sorted[1].guid(), Some("10"));
    assert_eq!(sorted[2].guid(), None);
    assert_eq!(sorted[3].guid(), Some("10"));
}
